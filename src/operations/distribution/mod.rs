//! Bar multiplicity along a run: count/spacing resolution, three-segment
//! custom distributions and their stored text form.

mod custom;
mod format;
mod spacing;

pub use custom::{resolve_custom_distribution, CustomDistribution, MiddleSegment, Segment};
pub use format::NumberDiameterList;
pub use spacing::{resolve_count_or_spacing, CountRounding, DistributionSpec};

use crate::error::{DistributionError, Result};

/// Converts an already rounded, non-negative bar count to `u32`.
///
/// Counts that are not finite or do not fit a `u32` are rejected rather than
/// saturated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn count_from(value: f64) -> Result<u32> {
    if !value.is_finite() || value > f64::from(u32::MAX) {
        return Err(DistributionError::InvalidInput(format!(
            "bar count {value} does not fit a u32"
        ))
        .into());
    }
    Ok(value.max(0.0) as u32)
}
