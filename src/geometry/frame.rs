use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};
use crate::math::{round_component, Point2, Point3, Vector3};

/// Sign convention applied to a face centre before offset arithmetic.
///
/// Chosen from the global axis the face normal points along, so the shape
/// formulas stay the same whichever side of the element was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSign {
    /// Front, right, top and non axis-aligned faces.
    Identity,
    /// Normal along -X: the local x coordinate is mirrored.
    LeftFace,
    /// Normal along +Y: the local x coordinate is mirrored.
    RearFace,
    /// Normal along -Z: the local y coordinate is mirrored.
    BottomFace,
}

impl AxisSign {
    /// Classifies a face normal given in the element's local frame.
    #[must_use]
    pub fn from_normal(normal: &Vector3) -> Self {
        if round_component(normal.x) == -1 {
            Self::LeftFace
        } else if round_component(normal.y) == 1 {
            Self::RearFace
        } else if round_component(normal.z) == -1 {
            Self::BottomFace
        } else {
            Self::Identity
        }
    }

    /// Applies the convention to an in-plane centre.
    #[must_use]
    pub fn apply(self, center: Point2) -> Point2 {
        match self {
            Self::Identity => center,
            Self::LeftFace | Self::RearFace => Point2::new(-center.x, center.y),
            Self::BottomFace => Point2::new(center.x, -center.y),
        }
    }
}

/// Normalized local frame of the structural face a bar is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    length: f64,
    width: f64,
    center: Point2,
    depth: f64,
    normal: Vector3,
    axis_sign: AxisSign,
}

impl FaceFrame {
    /// Creates a frame from its spans, centre and the face normal.
    ///
    /// `depth` is the centroid coordinate along the normal axis; planar
    /// shapes ignore it.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidInput` if a span is not strictly positive
    /// or the normal is zero.
    pub fn new(
        length: f64,
        width: f64,
        center: Point2,
        depth: f64,
        normal: Vector3,
    ) -> Result<Self> {
        if !(length > 0.0 && width > 0.0) {
            return Err(ShapeError::InvalidInput(format!(
                "face spans must be positive, got {length} x {width}"
            ))
            .into());
        }
        let norm = normal.norm();
        if norm < crate::math::TOLERANCE {
            return Err(ShapeError::InvalidInput("face normal must be non-zero".into()).into());
        }
        let normal = normal / norm;
        Ok(Self {
            length,
            width,
            center,
            depth,
            normal,
            axis_sign: AxisSign::from_normal(&normal),
        })
    }

    /// Creates a frame for a face lying in the XY plane facing +Z.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidInput` if a span is not strictly positive.
    pub fn planar(length: f64, width: f64, center: Point2) -> Result<Self> {
        Self::new(length, width, center, 0.0, Vector3::z())
    }

    /// Derives a frame from an axis-aligned planar face.
    ///
    /// `extents` are the bounding-box lengths of the face along X, Y and Z.
    /// The first in-plane axis supplies `length` and `cx`; Y (when in-plane)
    /// or else Z supplies `width` and `cy`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::UnsupportedFace` if the normal is not aligned
    /// with a global axis.
    pub fn from_planar_face(
        normal: Vector3,
        center_of_mass: Point3,
        extents: Vector3,
    ) -> Result<Self> {
        let in_plane: Vec<usize> = (0..3).filter(|&i| round_component(normal[i]) == 0).collect();
        if in_plane.len() != 2 {
            tracing::warn!(?normal, "face normal is not axis-aligned");
            return Err(ShapeError::UnsupportedFace {
                normal: [normal.x, normal.y, normal.z],
            }
            .into());
        }
        let (first, second) = (in_plane[0], in_plane[1]);
        let out_of_plane = 3 - first - second;
        Self::new(
            extents[first],
            extents[second],
            Point2::new(center_of_mass[first], center_of_mass[second]),
            center_of_mass[out_of_plane],
            normal,
        )
    }

    /// Span of the face along its local x axis.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Span of the face along its local y axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Raw in-plane centre as supplied.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Centre after applying the axis sign convention.
    #[must_use]
    pub fn signed_center(&self) -> Point2 {
        self.axis_sign.apply(self.center)
    }

    /// Centroid coordinate along the normal axis.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Unit face normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Sign convention derived from the normal.
    #[must_use]
    pub fn axis_sign(&self) -> AxisSign {
        self.axis_sign
    }
}

/// Cover distances from the face edges to the bar surface.
///
/// Each shape documents which covers it reads; the rest are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Covers {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Covers {
    /// Creates a cover set.
    #[must_use]
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Same cover on all four sides.
    #[must_use]
    pub fn uniform(cover: f64) -> Self {
        Self::new(cover, cover, cover, cover)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn axis_sign_classification() {
        assert_eq!(AxisSign::from_normal(&Vector3::new(-1.0, 0.0, 0.0)), AxisSign::LeftFace);
        assert_eq!(AxisSign::from_normal(&Vector3::new(0.0, 1.0, 0.0)), AxisSign::RearFace);
        assert_eq!(AxisSign::from_normal(&Vector3::new(0.0, 0.0, -1.0)), AxisSign::BottomFace);
        assert_eq!(AxisSign::from_normal(&Vector3::new(1.0, 0.0, 0.0)), AxisSign::Identity);
        assert_eq!(AxisSign::from_normal(&Vector3::new(0.0, -1.0, 0.0)), AxisSign::Identity);
        assert_eq!(AxisSign::from_normal(&Vector3::z()), AxisSign::Identity);
    }

    #[test]
    fn signed_center_mirrors() {
        let c = Point2::new(100.0, 50.0);
        assert_eq!(AxisSign::LeftFace.apply(c), Point2::new(-100.0, 50.0));
        assert_eq!(AxisSign::RearFace.apply(c), Point2::new(-100.0, 50.0));
        assert_eq!(AxisSign::BottomFace.apply(c), Point2::new(100.0, -50.0));
        assert_eq!(AxisSign::Identity.apply(c), c);
    }

    #[test]
    fn rejects_non_positive_spans() {
        assert!(FaceFrame::planar(0.0, 100.0, Point2::origin()).is_err());
        assert!(FaceFrame::planar(100.0, -1.0, Point2::origin()).is_err());
        assert!(FaceFrame::planar(f64::NAN, 1.0, Point2::origin()).is_err());
    }

    #[test]
    fn from_front_face() {
        // Face facing -Y on a 1000 x 400 x 300 beam: spans X (length) and Z (width).
        let frame = FaceFrame::from_planar_face(
            Vector3::new(0.0, -1.0, 0.0),
            Point3::new(500.0, 0.0, 150.0),
            Vector3::new(1000.0, 0.0, 300.0),
        )
        .unwrap();
        assert!((frame.length() - 1000.0).abs() < 1e-12);
        assert!((frame.width() - 300.0).abs() < 1e-12);
        assert_eq!(frame.center(), Point2::new(500.0, 150.0));
        assert!(frame.depth().abs() < 1e-12);
        assert_eq!(frame.axis_sign(), AxisSign::Identity);
    }

    #[test]
    fn from_left_face_mirrors_x() {
        let frame = FaceFrame::from_planar_face(
            Vector3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 200.0, 150.0),
            Vector3::new(0.0, 400.0, 300.0),
        )
        .unwrap();
        assert!((frame.length() - 400.0).abs() < 1e-12);
        assert!((frame.width() - 300.0).abs() < 1e-12);
        assert_eq!(frame.signed_center(), Point2::new(-200.0, 150.0));
    }

    #[test]
    fn from_top_face_spans_xy() {
        let frame = FaceFrame::from_planar_face(
            Vector3::z(),
            Point3::new(200.0, 150.0, 3000.0),
            Vector3::new(400.0, 300.0, 0.0),
        )
        .unwrap();
        assert!((frame.length() - 400.0).abs() < 1e-12);
        assert!((frame.width() - 300.0).abs() < 1e-12);
        assert!((frame.depth() - 3000.0).abs() < 1e-12);
    }

    #[test]
    fn oblique_face_is_unsupported() {
        let n = Vector3::new(1.0, 1.0, 0.0).normalize();
        let result = FaceFrame::from_planar_face(n, Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        assert!(matches!(
            result,
            Err(crate::error::RebarError::Shape(ShapeError::UnsupportedFace { .. }))
        ));
    }
}
