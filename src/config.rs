//! Stored parameters of one bar run.
//!
//! A [`RebarConfig`] is what a host keeps on the bar object so the run can be
//! regenerated later: the shape family with its parameters, covers, diameter
//! and distribution. The custom distribution keeps its `a@s+...` text form.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result, ShapeError};
use crate::geometry::Covers;
use crate::operations::distribution::{
    resolve_count_or_spacing, CountRounding, CustomDistribution, DistributionSpec,
};
use crate::operations::shape::ShapeKind;

/// Schema version written by this crate.
pub const CONFIG_VERSION: u32 = 1;

fn default_rounding() -> f64 {
    2.0
}

/// Parameters of one bar run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarConfig {
    pub version: u32,
    pub shape: ShapeKind,
    pub covers: Covers,
    /// Cover at the start of the run, along the distribution axis.
    pub front_cover: f64,
    pub diameter: f64,
    /// Corner fillet radius in bar diameters.
    #[serde(default = "default_rounding")]
    pub rounding: f64,
    pub distribution: DistributionSpec,
    #[serde(default)]
    pub count_rounding: CountRounding,
    /// Overrides `distribution` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_spacing: Option<CustomDistribution>,
}

impl RebarConfig {
    /// Creates a config at the current schema version with the default
    /// rounding of two diameters.
    #[must_use]
    pub fn new(
        shape: ShapeKind,
        covers: Covers,
        front_cover: f64,
        diameter: f64,
        distribution: DistributionSpec,
    ) -> Self {
        Self {
            version: CONFIG_VERSION,
            shape,
            covers,
            front_cover,
            diameter,
            rounding: default_rounding(),
            distribution,
            count_rounding: CountRounding::default(),
            custom_spacing: None,
        }
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: f64) -> Self {
        self.rounding = rounding;
        self
    }

    #[must_use]
    pub fn with_count_rounding(mut self, rounding: CountRounding) -> Self {
        self.count_rounding = rounding;
        self
    }

    #[must_use]
    pub fn with_custom_spacing(mut self, distribution: CustomDistribution) -> Self {
        self.custom_spacing = Some(distribution);
        self
    }

    /// Checks a freshly loaded config.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedVersion` for any other schema version
    /// and `ShapeError::InvalidInput` for a non-positive diameter or negative
    /// covers.
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            tracing::warn!(
                found = self.version,
                expected = CONFIG_VERSION,
                "unsupported config version"
            );
            return Err(ParseError::UnsupportedVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            }
            .into());
        }
        if self.diameter.is_nan() || self.diameter <= 0.0 {
            return Err(ShapeError::InvalidInput(format!(
                "bar diameter must be positive, got {}",
                self.diameter
            ))
            .into());
        }
        let Covers {
            left,
            right,
            top,
            bottom,
        } = self.covers;
        if [left, right, top, bottom, self.front_cover, self.rounding]
            .iter()
            .any(|v| v.is_nan() || *v < 0.0)
        {
            return Err(
                ShapeError::InvalidInput("covers and rounding must not be negative".into()).into(),
            );
        }
        Ok(())
    }

    /// Offset of the first bar's axis from the start of the run.
    #[must_use]
    pub fn front_offset(&self) -> f64 {
        self.front_cover + self.diameter / 2.0
    }

    /// Fillet radius of bent corners.
    #[must_use]
    pub fn fillet_radius(&self) -> f64 {
        self.rounding * self.diameter
    }

    /// Number of bars along a run of length `span`.
    ///
    /// A custom distribution gives its total directly; otherwise the
    /// distribution is resolved over `span` less one bar diameter.
    ///
    /// # Errors
    ///
    /// Propagates the spacing solver's errors and the custom total's
    /// overflow error.
    pub fn bar_count(&self, span: f64) -> Result<u32> {
        if let Some(custom) = &self.custom_spacing {
            return custom.total_bars();
        }
        let (count, _) =
            resolve_count_or_spacing(span, self.distribution, self.diameter, self.count_rounding)?;
        Ok(count)
    }
}
