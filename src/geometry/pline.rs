use crate::math::arc_2d::{arc_from_bulge, arc_point_at};
use crate::math::Point3;

/// Bulge-encoded polyline vertex for mixed line/arc segments.
///
/// `bulge = tan(sweep_angle / 4)`:
/// - `0` = straight line to next vertex
/// - `> 0` = counter-clockwise arc to next vertex
/// - `< 0` = clockwise arc to next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    /// Creates a new vertex with the given coordinates and bulge.
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    /// Creates a line vertex (bulge = 0).
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }
}

/// An open planar bar outline with mixed straight and circular-arc segments.
///
/// This is the form handed to the sketch builder: every segment between
/// consecutive vertices is a line (bulge=0) or a fillet arc (bulge≠0).
#[derive(Debug, Clone, PartialEq)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
}

impl Pline {
    /// Creates a `Pline` from `Point3` vertices with all-zero bulges (line segments only).
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        let vertices = points
            .iter()
            .map(|p| PlineVertex::line(p.x, p.y))
            .collect();
        Self { vertices }
    }

    /// Converts this polyline to a list of `Point3` by tessellating arcs into line segments.
    ///
    /// `tolerance` controls the maximum deviation between the arc and its chord approximation.
    #[must_use]
    pub fn to_points(&self, tolerance: f64) -> Vec<Point3> {
        let n = self.vertices.len();
        if n == 0 {
            return Vec::new();
        }

        let mut points = Vec::with_capacity(n * 2);
        points.push(Point3::new(self.vertices[0].x, self.vertices[0].y, 0.0));

        for pair in self.vertices.windows(2) {
            let (v0, v1) = (&pair[0], &pair[1]);
            let (cx, cy, radius, start_angle, sweep) =
                arc_from_bulge(v0.x, v0.y, v1.x, v1.y, v0.bulge);

            if radius > 1e-12 {
                let n_sub = arc_subdivision_count(radius, sweep.abs(), tolerance);
                for j in 1..n_sub {
                    let t = f64::from(j) / f64::from(n_sub);
                    let (px, py) = arc_point_at(cx, cy, radius, start_angle, sweep, t);
                    points.push(Point3::new(px, py, 0.0));
                }
            }
            points.push(Point3::new(v1.x, v1.y, 0.0));
        }

        points
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns the number of arc segments.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.vertices
            .iter()
            .take(self.segment_count())
            .filter(|v| v.bulge.abs() >= 1e-12)
            .count()
    }

    /// Total length of the straight segments.
    #[must_use]
    pub fn straight_length(&self) -> f64 {
        self.vertices
            .windows(2)
            .filter(|pair| pair[0].bulge.abs() < 1e-12)
            .map(|pair| (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y))
            .sum()
    }

    /// Developed length along lines and arcs.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| {
                let (v0, v1) = (&pair[0], &pair[1]);
                let (_, _, radius, _, sweep) = arc_from_bulge(v0.x, v0.y, v1.x, v1.y, v0.bulge);
                if radius > 1e-12 {
                    radius * sweep.abs()
                } else {
                    (v1.x - v0.x).hypot(v1.y - v0.y)
                }
            })
            .sum()
    }

    /// Sharp-edged length used for cutting schedules: the straight parts
    /// plus `2 * fillet_radius` per rounded corner.
    #[must_use]
    pub fn sharp_edged_length(&self, fillet_radius: f64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let corners = self.arc_count() as f64;
        self.straight_length() + 2.0 * corners * fillet_radius
    }
}

/// Computes the number of line segments needed to approximate an arc
/// within the given tolerance.
fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // From the sagitta formula: sagitta = r * (1 - cos(θ/2))
    // For a given tolerance: θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        std::f64::consts::PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}
