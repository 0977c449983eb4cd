use crate::error::{Result, ShapeError};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};
use crate::math::rounding::{check_tangent_angle, extended_tangent_length};
use crate::math::{Point3, Vector3};

use super::check_diameter;

/// Generates a closed rectangular tie with two end hooks.
///
/// The tie starts with a hook at the top-left corner, runs down, across,
/// up and back along the top, then closes with a second hook. The closing
/// corner and its hook are shifted by one diameter against the face normal
/// (local `-z`) so the two hooks do not overlap.
pub struct RectangularStirrup {
    frame: FaceFrame,
    covers: Covers,
    diameter: f64,
    bent_angle: f64,
    bent_factor: f64,
    rounding: f64,
}

impl RectangularStirrup {
    /// Creates a new `RectangularStirrup` operation.
    ///
    /// `bent_angle` is the hook bend in degrees (135 for a seismic hook),
    /// `bent_factor` the straight hook extension in diameters and `rounding`
    /// the fillet radius in diameters.
    #[must_use]
    pub fn new(
        frame: FaceFrame,
        covers: Covers,
        diameter: f64,
        bent_angle: f64,
        bent_factor: f64,
        rounding: f64,
    ) -> Self {
        Self {
            frame,
            covers,
            diameter,
            bent_angle,
            bent_factor,
            rounding,
        }
    }

    /// Distance from the corner to the free end of each hook.
    ///
    /// The straight extension is lengthened by what the rounded hook bend
    /// consumes.
    #[must_use]
    pub fn hook_length(&self) -> f64 {
        let hook_angle = 180.0 - self.bent_angle;
        self.bent_factor * self.diameter
            + extended_tangent_length(self.rounding, self.diameter, hook_angle)
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::DegenerateAngle` if `bent_angle` is not inside
    /// `(90, 180)`, and `ShapeError::InvalidInput` for a non-positive
    /// diameter or negative factors.
    pub fn execute(&self) -> Result<CenterlinePolyline> {
        check_diameter(self.diameter)?;
        check_tangent_angle(180.0 - self.bent_angle).map_err(|_| ShapeError::DegenerateAngle {
            angle: self.bent_angle,
        })?;
        if self.bent_factor < 0.0 || self.rounding < 0.0 {
            return Err(ShapeError::InvalidInput(format!(
                "bent factor {} and rounding {} must not be negative",
                self.bent_factor, self.rounding
            ))
            .into());
        }

        let c = self.frame.signed_center();
        let half_l = self.frame.length() / 2.0;
        let half_w = self.frame.width() / 2.0;
        let half_d = self.diameter / 2.0;
        let cv = &self.covers;

        let x_left = c.x - half_l + cv.left + half_d;
        let x_right = c.x + half_l - cv.right - half_d;
        let y_top = c.y + half_w - cv.top - half_d;
        let y_bottom = c.y - half_w + cv.bottom + half_d;

        let hook = self.hook_length();
        let theta = (180.0 - self.bent_angle).to_radians();
        // Both hooks point into the section, turned from the adjacent leg.
        let start_dir = Vector3::new(theta.sin(), -theta.cos(), 0.0);
        let end_dir = Vector3::new(theta.cos(), -theta.sin(), 0.0);

        let corner = Point3::new(x_left, y_top, 0.0);
        let closing = Point3::new(x_left, y_top, -self.diameter);

        Ok(CenterlinePolyline::new(vec![
            corner + start_dir * hook,
            corner,
            Point3::new(x_left, y_bottom, 0.0),
            Point3::new(x_right, y_bottom, 0.0),
            Point3::new(x_right, y_top, 0.0),
            closing,
            closing + end_dir * hook,
        ]))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RebarError;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn stirrup(bent_angle: f64) -> RectangularStirrup {
        let frame = FaceFrame::planar(300.0, 500.0, Point2::new(0.0, 0.0)).unwrap();
        RectangularStirrup::new(frame, Covers::uniform(25.0), 8.0, bent_angle, 6.0, 2.0)
    }

    #[test]
    fn seven_points_around_the_covers() {
        let line = stirrup(135.0).execute().unwrap();
        let p = line.points();
        assert_eq!(p.len(), 7);
        assert_relative_eq!(p[1].x, -150.0 + 25.0 + 4.0);
        assert_relative_eq!(p[1].y, 250.0 - 25.0 - 4.0);
        assert_relative_eq!(p[2].y, -221.0);
        assert_relative_eq!(p[3].x, 121.0);
        assert_relative_eq!(p[4].y, 221.0);
        assert_relative_eq!(p[5].x, p[1].x);
        assert_relative_eq!(p[5].z, -8.0);
    }

    #[test]
    fn seismic_hooks_point_inward_at_45_degrees() {
        let s = stirrup(135.0);
        let line = s.execute().unwrap();
        let p = line.points();
        let first = p[0] - p[1];
        let last = p[6] - p[5];
        // R = 16: hook = 6*8 + 16/sin(45) + 16*tan(45).
        let expected = 48.0 + 16.0 * 2f64.sqrt() + 16.0;
        assert_relative_eq!(s.hook_length(), expected, epsilon = 1e-9);
        assert_relative_eq!(first.norm(), expected, epsilon = 1e-9);
        assert_relative_eq!(last.norm(), expected, epsilon = 1e-9);
        assert!(first.x > 0.0 && first.y < 0.0);
        assert_relative_eq!(first.x, -first.y, epsilon = 1e-9);
        assert_relative_eq!(last.x, -last.y, epsilon = 1e-9);
    }

    #[test]
    fn hook_bend_must_exceed_right_angle() {
        for angle in [90.0, 180.0, 60.0] {
            assert!(matches!(
                stirrup(angle).execute(),
                Err(RebarError::Shape(ShapeError::DegenerateAngle { .. }))
            ));
        }
    }

    #[test]
    fn negative_factor_is_rejected() {
        let frame = FaceFrame::planar(300.0, 500.0, Point2::new(0.0, 0.0)).unwrap();
        let covers = Covers::uniform(25.0);
        let result = RectangularStirrup::new(frame, covers, 8.0, 135.0, -1.0, 2.0).execute();
        assert!(result.is_err());
    }
}
