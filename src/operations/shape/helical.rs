use crate::error::{Result, ShapeError};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};
use crate::math::{round_component, Point3};

use super::check_diameter;

/// Generates a circular (helical) stirrup as a faceted spiral.
///
/// The face must be normal to the extrusion axis (local ±Z). Each ring is a
/// polygon of `edges` sides on a circle of radius `length / 2 - side_cover`
/// around the face centre; the spiral advances `pitch / edges` per point,
/// moving into the element, until it has covered
/// `size - top_cover - bottom_cover`.
pub struct HelicalStirrup {
    frame: FaceFrame,
    covers: Covers,
    diameter: f64,
    side_cover: f64,
    pitch: f64,
    edges: u32,
    size: f64,
}

impl HelicalStirrup {
    /// Creates a new `HelicalStirrup` operation.
    ///
    /// Reads the top and bottom covers from `covers`; `size` is the length of
    /// the element along the face normal.
    #[must_use]
    pub fn new(
        frame: FaceFrame,
        covers: Covers,
        diameter: f64,
        side_cover: f64,
        pitch: f64,
        edges: u32,
        size: f64,
    ) -> Self {
        Self {
            frame,
            covers,
            diameter,
            side_cover,
            pitch,
            edges,
            size,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::UnsupportedFace` when the face normal is not along
    /// ±Z, and `ShapeError::InvalidInput` for a non-positive pitch, fewer than
    /// three edges, a non-positive radius or an element too short for the
    /// covers.
    pub fn execute(&self) -> Result<CenterlinePolyline> {
        check_diameter(self.diameter)?;
        let normal = self.frame.normal();
        let direction = match round_component(normal.z) {
            1 => 1.0,
            -1 => -1.0,
            _ => {
                return Err(ShapeError::UnsupportedFace {
                    normal: [normal.x, normal.y, normal.z],
                }
                .into())
            }
        };
        if self.pitch.is_nan() || self.pitch <= 0.0 || self.edges < 3 {
            return Err(ShapeError::InvalidInput(format!(
                "helical stirrup needs a positive pitch and at least 3 edges, \
                 got pitch {} with {} edges",
                self.pitch, self.edges
            ))
            .into());
        }
        let radius = self.frame.length() / 2.0 - self.side_cover;
        if radius <= 0.0 {
            return Err(ShapeError::InvalidInput(format!(
                "side cover {} leaves no room for the spiral",
                self.side_cover
            ))
            .into());
        }
        if self.size <= self.covers.bottom + self.covers.top {
            return Err(ShapeError::InvalidInput(format!(
                "element size {} does not exceed top and bottom covers",
                self.size
            ))
            .into());
        }

        let height = self.size - self.covers.bottom - self.covers.top;
        let edges = f64::from(self.edges);
        let dz = self.pitch / edges;
        let center = self.frame.center();
        let mut zz = if direction > 0.0 {
            self.frame.depth() - self.covers.top
        } else {
            self.frame.depth() + self.covers.bottom
        };

        // `travelled` starts one step behind so the first ring's closing
        // point lands exactly one pitch down.
        let mut travelled = -dz;
        let mut points = Vec::new();
        let mut first_ring = true;
        while travelled.round() < height {
            let start = if first_ring { 0 } else { 1 };
            for i in start..=self.edges {
                let angle = (f64::from(i) * 360.0 / edges).to_radians();
                points.push(Point3::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                    zz,
                ));
                zz -= direction * dz;
                travelled += dz;
            }
            first_ring = false;
        }

        tracing::debug!(points = points.len(), radius, dz, "helical stirrup generated");
        Ok(CenterlinePolyline::new(points))
    }
}
