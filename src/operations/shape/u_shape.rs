use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RebarError, Result};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};
use crate::math::Point2;

use super::{check_diameter, invalid_orientation};

/// Side of the face that holds the web of a U-shaped bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UShapeOrientation {
    Bottom,
    Top,
    Left,
    Right,
}

impl FromStr for UShapeOrientation {
    type Err = RebarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Bottom" => Ok(Self::Bottom),
            "Top" => Ok(Self::Top),
            "Left" => Ok(Self::Left),
            "Right" => Ok(Self::Right),
            other => Err(invalid_orientation("U-shape", other)),
        }
    }
}

/// Generates the four points of a U-shaped bar: leg, web, leg.
pub struct UShape {
    frame: FaceFrame,
    covers: Covers,
    diameter: f64,
    orientation: UShapeOrientation,
}

impl UShape {
    /// Creates a new `UShape` operation.
    #[must_use]
    pub fn new(
        frame: FaceFrame,
        covers: Covers,
        diameter: f64,
        orientation: UShapeOrientation,
    ) -> Self {
        Self {
            frame,
            covers,
            diameter,
            orientation,
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

        // Inset positions of the four sides and the free-end positions.
        let x_left = c.x - half_l + cv.left + half_d;
        let x_right = c.x + half_l - cv.right - half_d;
        let y_bottom = c.y - half_w + cv.bottom + half_d;
        let y_top = c.y + half_w - cv.top - half_d;

        let points = match self.orientation {
            UShapeOrientation::Bottom | UShapeOrientation::Top => {
                let (web, free) = if self.orientation == UShapeOrientation::Bottom {
                    (y_bottom, c.y + half_w - cv.top)
                } else {
                    (y_top, c.y - half_w + cv.bottom)
                };
                [
                    Point2::new(x_left, free),
                    Point2::new(x_left, web),
                    Point2::new(x_right, web),
                    Point2::new(x_right, free),
                ]
            }
            UShapeOrientation::Left | UShapeOrientation::Right => {
                let (web, free) = if self.orientation == UShapeOrientation::Left {
                    (x_left, c.x + half_l - cv.right)
                } else {
                    (x_right, c.x - half_l + cv.left)
                };
                [
                    Point2::new(free, y_top),
                    Point2::new(web, y_top),
                    Point2::new(web, y_bottom),
                    Point2::new(free, y_bottom),
                ]
            }
        };
        Ok(CenterlinePolyline::planar(&points))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> FaceFrame {
        FaceFrame::planar(500.0, 300.0, Point2::new(0.0, 0.0)).unwrap()
    }

    #[test]
    fn bottom_web() {
        let covers = Covers::new(30.0, 30.0, 20.0, 40.0);
        let line = UShape::new(frame(), covers, 10.0, UShapeOrientation::Bottom)
            .execute()
            .unwrap();
        let p = line.points();
        assert_eq!(p.len(), 4);
        assert_relative_eq!(p[0].x, -215.0);
        assert_relative_eq!(p[0].y, 130.0);
        assert_relative_eq!(p[1].y, -105.0);
        assert_relative_eq!(p[2].x, 215.0);
        assert_relative_eq!(p[3].y, 130.0);
        // Two legs of 235 and a web of 430.
        assert_relative_eq!(line.length(), 900.0);
    }

    #[test]
    fn right_web_is_mirror_of_left() {
        let covers = Covers::uniform(25.0);
        let left = UShape::new(frame(), covers, 12.0, UShapeOrientation::Left).execute().unwrap();
        let right = UShape::new(frame(), covers, 12.0, UShapeOrientation::Right).execute().unwrap();
        for (a, b) in left.points().iter().zip(right.points()) {
            assert_relative_eq!(a.x, -b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }
        assert_relative_eq!(left.points()[1].x, -250.0 + 25.0 + 6.0);
        assert_relative_eq!(left.points()[0].x, 250.0 - 25.0);
    }

    #[test]
    fn top_web_hangs_down() {
        let line = UShape::new(frame(), Covers::uniform(25.0), 12.0, UShapeOrientation::Top)
            .execute()
            .unwrap();
        let p = line.points();
        assert!(p[1].y > p[0].y);
        assert_relative_eq!(p[1].y, 150.0 - 25.0 - 6.0);
    }

    #[test]
    fn parses_tags() {
        assert_eq!("Right".parse::<UShapeOrientation>().unwrap(), UShapeOrientation::Right);
        assert!("bottom".parse::<UShapeOrientation>().is_err());
    }
}
