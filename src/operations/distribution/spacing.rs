use serde::{Deserialize, Serialize};

use crate::error::{DistributionError, Result};

use super::count_from;

/// How many bars a run holds: either a fixed count or a target spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionSpec {
    Count(u32),
    Spacing(f64),
}

/// How a spacing-driven bar count is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountRounding {
    /// Round up, so the actual spacing never exceeds the requested one.
    #[default]
    Up,
    /// Truncate the exact division (straight bars laid across a width).
    Truncate,
}

/// Resolves a distribution into `(count, spacing)` over `span`.
///
/// `allowance` is subtracted from the span first (end offsets, or one bar
/// diameter for straight bars). A count divides the remaining length
/// evenly; a spacing is kept as given and the count follows from `rounding`,
/// never dropping below one bar.
///
/// # Errors
///
/// Returns `DistributionError::InfeasibleLayout` when the allowance leaves
/// no length, and `DistributionError::InvalidInput` for a zero count, a
/// non-positive or infinite spacing, or a count past `u32::MAX`.
pub fn resolve_count_or_spacing(
    span: f64,
    spec: DistributionSpec,
    allowance: f64,
    rounding: CountRounding,
) -> Result<(u32, f64)> {
    let available = span - allowance;
    if available.is_nan() || available <= 0.0 {
        tracing::warn!(span, allowance, "distribution span exhausted by allowance");
        return Err(DistributionError::InfeasibleLayout {
            span,
            required: allowance,
        }
        .into());
    }

    let resolved = match spec {
        DistributionSpec::Count(0) => {
            return Err(
                DistributionError::InvalidInput("bar count must be at least 1".into()).into(),
            )
        }
        DistributionSpec::Count(n) => (n, available / f64::from(n)),
        DistributionSpec::Spacing(s) if !s.is_finite() || s <= 0.0 => {
            return Err(DistributionError::InvalidInput(format!(
                "spacing must be positive and finite, got {s}"
            ))
            .into())
        }
        DistributionSpec::Spacing(s) => {
            let exact = available / s;
            let count = match rounding {
                CountRounding::Up => exact.ceil(),
                CountRounding::Truncate => exact.trunc(),
            };
            (count_from(count)?.max(1), s)
        }
    };
    tracing::debug!(count = resolved.0, spacing = resolved.1, "resolved distribution");
    Ok(resolved)
}
