//! Centerline generators, one operation per rebar shape family.
//!
//! Every generator reads a [`FaceFrame`], a [`Covers`] set and the bar
//! diameter and returns the ordered centerline of one bar. Covers that bound
//! a leg sideways are inset by half a diameter so the bar surface, not its
//! axis, sits at the cover; covers at a free bar end are not.

mod bent;
mod helical;
mod l_shape;
mod stirrup;
mod straight;
mod u_shape;

pub use bent::{BentOrientation, BentShape};
pub use helical::HelicalStirrup;
pub use l_shape::{HookAxis, LShape, LShapeOrientation, SectionSide};
pub use stirrup::RectangularStirrup;
pub use straight::{StraightPlacement, StraightShape};
pub use u_shape::{UShape, UShapeOrientation};

use serde::{Deserialize, Serialize};

use crate::error::{RebarError, Result, ShapeError};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};

/// Shape family together with its family-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeKind {
    Straight {
        placement: StraightPlacement,
    },
    LShape {
        orientation: LShapeOrientation,
        hook_along: HookAxis,
        hook_length: Option<f64>,
        /// Needed by the inside and outside orientations.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section_side: Option<SectionSide>,
    },
    UShape {
        orientation: UShapeOrientation,
    },
    Bent {
        orientation: BentOrientation,
        bent_length: f64,
        bent_angle: f64,
    },
    Stirrup {
        bent_angle: f64,
        bent_factor: f64,
        rounding: f64,
    },
    Helical {
        side_cover: f64,
        pitch: f64,
        edges: u32,
        size: f64,
    },
}

impl ShapeKind {
    /// Short family name, as used in error messages and logs.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            Self::Straight { .. } => "straight",
            Self::LShape { .. } => "L-shape",
            Self::UShape { .. } => "U-shape",
            Self::Bent { .. } => "bent-shape",
            Self::Stirrup { .. } => "stirrup",
            Self::Helical { .. } => "helical",
        }
    }
}

/// Generates the centerline of one bar of the given shape.
///
/// # Errors
///
/// Propagates the error of the selected family's operation.
pub fn generate(
    kind: &ShapeKind,
    frame: &FaceFrame,
    covers: &Covers,
    diameter: f64,
) -> Result<CenterlinePolyline> {
    let polyline = match *kind {
        ShapeKind::Straight { placement } => {
            StraightShape::new(*frame, *covers, diameter, placement).execute()
        }
        ShapeKind::LShape {
            orientation,
            hook_along,
            hook_length,
            section_side,
        } => {
            let mut shape = LShape::new(*frame, *covers, diameter, orientation, hook_along);
            if let Some(side) = section_side {
                shape = shape.with_section_side(side);
            }
            match hook_length {
                Some(length) => shape.with_hook_length(length).execute(),
                None => shape.execute(),
            }
        }
        ShapeKind::UShape { orientation } => {
            UShape::new(*frame, *covers, diameter, orientation).execute()
        }
        ShapeKind::Bent {
            orientation,
            bent_length,
            bent_angle,
        } => BentShape::new(*frame, *covers, diameter, orientation, bent_length, bent_angle)
            .execute(),
        ShapeKind::Stirrup {
            bent_angle,
            bent_factor,
            rounding,
        } => RectangularStirrup::new(*frame, *covers, diameter, bent_angle, bent_factor, rounding)
            .execute(),
        ShapeKind::Helical {
            side_cover,
            pitch,
            edges,
            size,
        } => HelicalStirrup::new(*frame, *covers, diameter, side_cover, pitch, edges, size)
            .execute(),
    }?;
    tracing::debug!(
        family = kind.family(),
        points = polyline.len(),
        "generated centerline"
    );
    Ok(polyline)
}

/// Rejects non-positive or non-finite bar diameters.
pub(crate) fn check_diameter(diameter: f64) -> Result<()> {
    if diameter > 0.0 && diameter.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::InvalidInput(format!(
            "bar diameter must be positive, got {diameter}"
        ))
        .into())
    }
}

/// Builds the error for an orientation tag no family variant matches.
pub(crate) fn invalid_orientation(family: &'static str, tag: &str) -> RebarError {
    tracing::warn!(family, tag, "unrecognized orientation");
    ShapeError::InvalidOrientation {
        family,
        tag: tag.to_owned(),
    }
    .into()
}
