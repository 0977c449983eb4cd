/// 2D arc/bulge math utilities.
///
/// Bulge convention: `bulge = tan(sweep_angle / 4)`.
/// - `bulge = 0`: straight line
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::PI;

use super::{Point2, Vector2, TOLERANCE};

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `(cx, cy, radius, start_angle, sweep_angle)`. Zero-length chords
/// give a degenerate arc with zero radius.
#[must_use]
pub fn arc_from_bulge(x0: f64, y0: f64, x1: f64, y1: f64, bulge: f64) -> (f64, f64, f64, f64, f64) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let chord_len = (dx * dx + dy * dy).sqrt();

    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return (x0, y0, 0.0, 0.0, 0.0);
    }

    // Distance from chord midpoint to center.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mx = (x0 + x1) * 0.5;
    let my = (y0 + y1) * 0.5;

    // Normal to chord pointing toward center (for positive bulge, center is left of chord).
    let nx = -dy / chord_len;
    let ny = dx / chord_len;

    let cx = mx + sagitta_ratio * (chord_len * 0.5) * nx;
    let cy = my + sagitta_ratio * (chord_len * 0.5) * ny;

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());

    let start_angle = (y0 - cy).atan2(x0 - cx);
    let sweep = 4.0 * bulge.atan();

    (cx, cy, radius, start_angle, sweep)
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(
    cx: f64,
    cy: f64,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    t: f64,
) -> (f64, f64) {
    let angle = start_angle + sweep * t;
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Tangent points and bulge of a fillet replacing the corner `b` of `a → b → c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFillet {
    /// Tangent point on segment `a → b`.
    pub start: Point2,
    /// Tangent point on segment `b → c`.
    pub end: Point2,
    /// Bulge of the arc from `start` to `end`.
    pub bulge: f64,
    /// Distance from the corner to each tangent point.
    pub tangent_length: f64,
}

/// Computes the fillet of radius `radius` at corner `b`.
///
/// Returns `None` for collinear segments (nothing to round) and for
/// zero-length or fully reversed segments, where no tangent arc exists.
#[must_use]
pub fn fillet_corner(a: &Point2, b: &Point2, c: &Point2, radius: f64) -> Option<CornerFillet> {
    let to_a: Vector2 = a - b;
    let to_c: Vector2 = c - b;
    let len_a = to_a.norm();
    let len_c = to_c.norm();
    if len_a < TOLERANCE || len_c < TOLERANCE {
        return None;
    }
    let u1 = to_a / len_a;
    let u2 = to_c / len_c;

    // Interior angle between the two legs at the corner.
    let interior = u1.dot(&u2).clamp(-1.0, 1.0).acos();
    if (PI - interior).abs() < 1e-9 || interior < 1e-9 {
        return None;
    }

    let tangent_length = radius / (interior / 2.0).tan();
    let incoming = b - a;
    let outgoing = c - b;
    let turn = incoming.x * outgoing.y - incoming.y * outgoing.x;
    let sweep = (PI - interior).copysign(turn);

    Some(CornerFillet {
        start: b + u1 * tangent_length,
        end: b + u2 * tangent_length,
        bulge: (sweep / 4.0).tan(),
        tangent_length,
    })
}
