use crate::error::{Result, ShapeError};
use crate::math::arc_2d::fillet_corner;
use crate::math::{Point2, Point3};

use super::pline::{Pline, PlineVertex};

/// Ordered centerline points of a bar, start to end through every bend.
///
/// Planar shapes keep `z = 0`; the stirrup families use `z` for the
/// offset along the face normal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CenterlinePolyline {
    points: Vec<Point3>,
}

impl CenterlinePolyline {
    /// Wraps an ordered point list.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Builds a planar centerline from 2D points.
    #[must_use]
    pub fn planar(points: &[Point2]) -> Self {
        Self {
            points: points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect(),
        }
    }

    /// The points in bend order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Consumes the polyline, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the straight segment lengths (the sharp-edged bar length).
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Replaces every interior corner by a tangent arc of `radius`.
    ///
    /// Only meaningful for planar centerlines; `z` is dropped. Collinear
    /// corners are kept as plain vertices.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidInput` if the radius is negative or a
    /// fillet does not fit on its adjacent segments.
    pub fn filleted(&self, radius: f64) -> Result<Pline> {
        if radius < 0.0 {
            return Err(
                ShapeError::InvalidInput(format!("fillet radius {radius} is negative")).into(),
            );
        }
        let flat: Vec<Point2> = self.points.iter().map(|p| Point2::new(p.x, p.y)).collect();
        if radius < crate::math::TOLERANCE || flat.len() < 3 {
            return Ok(Pline::from_points(&self.points));
        }

        // Tangent length already claimed at the far end of each segment.
        let mut consumed = vec![0.0; flat.len()];
        let mut vertices = vec![PlineVertex::line(flat[0].x, flat[0].y)];

        for i in 1..flat.len() - 1 {
            let Some(fillet) = fillet_corner(&flat[i - 1], &flat[i], &flat[i + 1], radius) else {
                vertices.push(PlineVertex::line(flat[i].x, flat[i].y));
                continue;
            };

            let before = (flat[i] - flat[i - 1]).norm();
            let after = (flat[i + 1] - flat[i]).norm();
            let before_limit = if i == 1 { before } else { before - consumed[i - 1] };
            let after_limit = if i + 1 == flat.len() - 1 { after } else { after / 2.0 };
            if fillet.tangent_length > before_limit + 1e-9
                || fillet.tangent_length > after_limit + 1e-9
            {
                return Err(ShapeError::InvalidInput(format!(
                    "fillet radius {radius} does not fit at corner {i}"
                ))
                .into());
            }
            consumed[i] = fillet.tangent_length;

            vertices.push(PlineVertex::new(fillet.start.x, fillet.start.y, fillet.bulge));
            vertices.push(PlineVertex::line(fillet.end.x, fillet.end.y));
        }

        let last = flat[flat.len() - 1];
        vertices.push(PlineVertex::line(last.x, last.y));
        Ok(Pline { vertices })
    }
}

impl From<CenterlinePolyline> for Vec<Point3> {
    fn from(value: CenterlinePolyline) -> Self {
        value.points
    }
}
