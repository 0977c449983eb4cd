//! Tangent lengths consumed by rounded bends.
//!
//! A sharp corner of a centerline is replaced by a circular fillet of radius
//! `rounding * diameter`. The helpers below return how much straight length
//! that fillet eats. Angles are in degrees and must lie strictly inside
//! `(0, 90)`; the helpers do not check this, see [`check_tangent_angle`].

use crate::error::{Result, ShapeError};

/// Extra length consumed by rounding an interior corner of a bar.
///
/// With `R = rounding * diameter`: `R / tan(angle) + R / cos(90 - angle) - R`.
#[must_use]
pub fn extended_tangent_part_length(rounding: f64, diameter: f64, angle: f64) -> f64 {
    let radius = rounding * diameter;
    let x1 = radius / angle.to_radians().tan();
    let x2 = radius / (90.0 - angle).to_radians().cos() - radius;
    x1 + x2
}

/// Extra length consumed by rounding the end hook of a bar.
///
/// With `R = rounding * diameter`: `R / sin(angle) + R * tan(90 - angle)`.
#[must_use]
pub fn extended_tangent_length(rounding: f64, diameter: f64, angle: f64) -> f64 {
    let radius = rounding * diameter;
    let x1 = radius / angle.to_radians().sin();
    let x2 = radius * (90.0 - angle).to_radians().tan();
    x1 + x2
}

/// Rejects angles outside the open interval `(0, 90)` degrees.
///
/// # Errors
///
/// Returns [`ShapeError::DegenerateAngle`] when `angle` is at or beyond a
/// singularity of the tangent helpers.
pub fn check_tangent_angle(angle: f64) -> Result<()> {
    if angle > 0.0 && angle < 90.0 {
        Ok(())
    } else {
        tracing::warn!(angle, "rejecting degenerate tangent angle");
        Err(ShapeError::DegenerateAngle { angle }.into())
    }
}
