use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RebarError, Result, ShapeError};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};
use crate::math::Point2;

use super::{check_diameter, invalid_orientation};

/// Side of the face the cranked middle run of a bent bar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BentOrientation {
    Bottom,
    Top,
    Left,
    Right,
}

impl FromStr for BentOrientation {
    type Err = RebarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Bottom" => Ok(Self::Bottom),
            "Top" => Ok(Self::Top),
            "Left" => Ok(Self::Left),
            "Right" => Ok(Self::Right),
            other => Err(invalid_orientation("bent-shape", other)),
        }
    }
}

/// Generates the six points of a bent (cranked) bar.
///
/// Two end legs of `bent_length` on one side of the face are joined to a
/// middle run on the opposite side by diagonals. Each diagonal is displaced
/// along the bar by `dis = depth * tan(bent_angle - 90)`, where `depth` is the
/// clear distance between the two runs.
pub struct BentShape {
    frame: FaceFrame,
    covers: Covers,
    diameter: f64,
    orientation: BentOrientation,
    bent_length: f64,
    bent_angle: f64,
}

impl BentShape {
    /// Creates a new `BentShape` operation. `bent_angle` is in degrees.
    #[must_use]
    pub fn new(
        frame: FaceFrame,
        covers: Covers,
        diameter: f64,
        orientation: BentOrientation,
        bent_length: f64,
        bent_angle: f64,
    ) -> Self {
        Self {
            frame,
            covers,
            diameter,
            orientation,
            bent_length,
            bent_angle,
        }
    }

    /// Horizontal (or vertical) displacement of each diagonal.
    fn displacement(&self, depth: f64) -> f64 {
        depth * (self.bent_angle - 90.0).to_radians().tan()
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::DegenerateAngle` if `bent_angle` is outside
    /// `(0, 180)`, and `ShapeError::InvalidInput` for a non-positive diameter
    /// or a negative bent length.
    pub fn execute(&self) -> Result<CenterlinePolyline> {
        check_diameter(self.diameter)?;
        if !(self.bent_angle > 0.0 && self.bent_angle < 180.0) {
            return Err(ShapeError::DegenerateAngle {
                angle: self.bent_angle,
            }
            .into());
        }
        if self.bent_length < 0.0 {
            return Err(ShapeError::InvalidInput(format!(
                "bent length must not be negative, got {}",
                self.bent_length
            ))
            .into());
        }

        let c = self.frame.signed_center();
        let length = self.frame.length();
        let width = self.frame.width();
        let half_d = self.diameter / 2.0;
        let bent = self.bent_length;
        let Covers {
            mut left,
            mut right,
            mut top,
            mut bottom,
        } = self.covers;

        let points = match self.orientation {
            BentOrientation::Bottom | BentOrientation::Top => {
                top += half_d;
                bottom += half_d;
                let y_top = c.y + width / 2.0 - top;
                let y_bottom = c.y - width / 2.0 + bottom;
                let (y_ends, y_middle) = if self.orientation == BentOrientation::Bottom {
                    (y_top, y_bottom)
                } else {
                    (y_bottom, y_top)
                };
                let dis = self.displacement(width - top - bottom);
                let x1 = c.x - length / 2.0 + left;
                let x2 = x1 + bent;
                let x4 = c.x + length / 2.0 - right - bent - dis;
                [
                    Point2::new(x1, y_ends),
                    Point2::new(x2, y_ends),
                    Point2::new(x2 + dis, y_middle),
                    Point2::new(x4, y_middle),
                    Point2::new(x4 + dis, y_ends),
                    Point2::new(x4 + dis + bent, y_ends),
                ]
            }
            BentOrientation::Left | BentOrientation::Right => {
                left += half_d;
                right += half_d;
                let x_left = c.x - length / 2.0 + left;
                let x_right = c.x + length / 2.0 - right;
                let (x_ends, x_middle) = if self.orientation == BentOrientation::Left {
                    (x_right, x_left)
                } else {
                    (x_left, x_right)
                };
                let dis = self.displacement(length - right - left);
                let y1 = c.y + width / 2.0 - top;
                let y2 = y1 - bent;
                let y4 = c.y - width / 2.0 + bottom + bent + dis;
                [
                    Point2::new(x_ends, y1),
                    Point2::new(x_ends, y2),
                    Point2::new(x_middle, y2 - dis),
                    Point2::new(x_middle, y4),
                    Point2::new(x_ends, y4 - dis),
                    Point2::new(x_ends, y4 - dis - bent),
                ]
            }
        };
        tracing::debug!(orientation = ?self.orientation, "bent-shape points computed");
        Ok(CenterlinePolyline::planar(&points))
    }
}
