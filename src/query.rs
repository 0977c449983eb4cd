//! Seam to the host that owns the structural solid.
//!
//! The kernel never inspects solids itself. A host implements
//! [`GeometryQuery`] for its element type, and [`plan_bar_run`] turns a
//! stored [`RebarConfig`] into the centerline and multiplicity of one run.

use crate::config::RebarConfig;
use crate::error::Result;
use crate::geometry::{CenterlinePolyline, FaceFrame};
use crate::math::Vector3;
use crate::operations::shape;

/// Geometry answers the kernel needs about one structural element.
pub trait GeometryQuery {
    /// Identifies a face of the element.
    type Face;

    /// Normalized local frame of a planar face.
    ///
    /// # Errors
    ///
    /// Fails when the face cannot be reduced to a rectangle with a supported
    /// orientation.
    fn face_frame(&self, face: &Self::Face) -> Result<FaceFrame>;

    /// Unit normal of a face in the element's local frame.
    ///
    /// # Errors
    ///
    /// Fails when the face does not exist or is not planar.
    fn face_normal(&self, face: &Self::Face) -> Result<Vector3>;

    /// Extent of the element projected onto `direction`.
    ///
    /// # Errors
    ///
    /// Fails when the element has no solid to project.
    fn projected_span(&self, direction: &Vector3) -> Result<f64>;
}

/// Centerline and multiplicity of one bar run.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRun {
    pub centerline: CenterlinePolyline,
    pub count: u32,
    /// Offset of the first bar's axis from the selected face.
    pub front_offset: f64,
}

/// Generates the bar run described by `config` on `face`.
///
/// Bars are repeated along the face normal, over the element's projected
/// span in that direction.
///
/// # Errors
///
/// Returns the config validation error, the host's query error, or the
/// shape and distribution errors.
pub fn plan_bar_run<Q: GeometryQuery>(
    query: &Q,
    face: &Q::Face,
    config: &RebarConfig,
) -> Result<BarRun> {
    config.validate()?;
    let frame = query.face_frame(face)?;
    let centerline = shape::generate(&config.shape, &frame, &config.covers, config.diameter)?;
    let span = query.projected_span(&query.face_normal(face)?)?;
    let count = config.bar_count(span)?;
    tracing::debug!(family = config.shape.family(), count, span, "planned bar run");
    Ok(BarRun {
        centerline,
        count,
        front_offset: config.front_offset(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{RebarError, ShapeError};
    use crate::geometry::Covers;
    use crate::math::Point3;
    use crate::operations::distribution::DistributionSpec;
    use crate::operations::shape::{ShapeKind, UShapeOrientation};

    /// Axis-aligned box with its minimum corner at the origin.
    struct BoxElement {
        size: Vector3,
    }

    impl GeometryQuery for BoxElement {
        type Face = Vector3;

        fn face_frame(&self, face: &Vector3) -> Result<FaceFrame> {
            let mut center = Point3::from(self.size / 2.0);
            let mut extents = self.size;
            for i in 0..3 {
                if face[i].abs() > 0.5 {
                    center[i] = if face[i] > 0.0 { self.size[i] } else { 0.0 };
                    extents[i] = 0.0;
                }
            }
            FaceFrame::from_planar_face(*face, center, extents)
        }

        fn face_normal(&self, face: &Vector3) -> Result<Vector3> {
            Ok(face.normalize())
        }

        fn projected_span(&self, direction: &Vector3) -> Result<f64> {
            Ok(direction.abs().dot(&self.size))
        }
    }

    #[test]
    fn plans_u_bars_along_a_beam() {
        let beam = BoxElement {
            size: Vector3::new(300.0, 4000.0, 500.0),
        };
        let config = RebarConfig::new(
            ShapeKind::UShape {
                orientation: UShapeOrientation::Bottom,
            },
            Covers::uniform(40.0),
            50.0,
            10.0,
            DistributionSpec::Spacing(200.0),
        );
        let run = plan_bar_run(&beam, &Vector3::new(0.0, -1.0, 0.0), &config).unwrap();
        assert_eq!(run.centerline.len(), 4);
        // Front face spans X and Z: web at z = 40 + 5.
        let web = run.centerline.points()[1];
        assert!((web.y - 45.0).abs() < 1e-9);
        // ceil((4000 - 10) / 200) = 20
        assert_eq!(run.count, 20);
        assert!((run.front_offset - 55.0).abs() < 1e-12);
    }

    #[test]
    fn skewed_face_is_unsupported() {
        let beam = BoxElement {
            size: Vector3::new(300.0, 300.0, 300.0),
        };
        let config = RebarConfig::new(
            ShapeKind::UShape {
                orientation: UShapeOrientation::Top,
            },
            Covers::uniform(40.0),
            50.0,
            10.0,
            DistributionSpec::Count(4),
        );
        let result = plan_bar_run(&beam, &Vector3::new(1.0, 1.0, 0.0), &config);
        assert!(matches!(
            result,
            Err(RebarError::Shape(ShapeError::UnsupportedFace { .. }))
        ));
    }
}
