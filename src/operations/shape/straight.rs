use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RebarError, Result};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};
use crate::math::Point2;

use super::{check_diameter, invalid_orientation};

/// Side of the face a straight bar runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StraightPlacement {
    /// Horizontal bar near the bottom edge.
    #[serde(rename = "Bottom Side")]
    BottomSide,
    /// Horizontal bar near the top edge.
    #[serde(rename = "Top Side")]
    TopSide,
    /// Vertical bar near the left edge.
    #[serde(rename = "Left Side")]
    LeftSide,
    /// Vertical bar near the right edge.
    #[serde(rename = "Right Side")]
    RightSide,
}

impl FromStr for StraightPlacement {
    type Err = RebarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Bottom Side" => Ok(Self::BottomSide),
            "Top Side" => Ok(Self::TopSide),
            "Left Side" => Ok(Self::LeftSide),
            "Right Side" => Ok(Self::RightSide),
            other => Err(invalid_orientation("straight", other)),
        }
    }
}

/// Generates the two end points of a straight bar.
///
/// Horizontal bars end at the left and right covers; vertical bars end at the
/// top and bottom covers.
pub struct StraightShape {
    frame: FaceFrame,
    covers: Covers,
    diameter: f64,
    placement: StraightPlacement,
}

impl StraightShape {
    /// Creates a new `StraightShape` operation.
    #[must_use]
    pub fn new(
        frame: FaceFrame,
        covers: Covers,
        diameter: f64,
        placement: StraightPlacement,
    ) -> Self {
        Self {
            frame,
            covers,
            diameter,
            placement,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidInput` if the diameter is not positive.
    pub fn execute(&self) -> Result<CenterlinePolyline> {
        check_diameter(self.diameter)?;
        let c = self.frame.signed_center();
        let half_l = self.frame.length() / 2.0;
        let half_w = self.frame.width() / 2.0;
        let half_d = self.diameter / 2.0;
        let cv = &self.covers;

        let (start, end) = match self.placement {
            StraightPlacement::BottomSide | StraightPlacement::TopSide => {
                let y = if self.placement == StraightPlacement::BottomSide {
                    c.y - half_w + cv.bottom + half_d
                } else {
                    c.y + half_w - cv.top - half_d
                };
                (
                    Point2::new(c.x - half_l + cv.left, y),
                    Point2::new(c.x + half_l - cv.right, y),
                )
            }
            StraightPlacement::LeftSide | StraightPlacement::RightSide => {
                let x = if self.placement == StraightPlacement::LeftSide {
                    c.x - half_l + cv.left + half_d
                } else {
                    c.x + half_l - cv.right - half_d
                };
                (
                    Point2::new(x, c.y + half_w - cv.top),
                    Point2::new(x, c.y - half_w + cv.bottom),
                )
            }
        };
        Ok(CenterlinePolyline::planar(&[start, end]))
    }
}
