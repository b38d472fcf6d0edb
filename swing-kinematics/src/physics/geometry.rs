//! Geometry primitives - distance, joint angle, exponential smoothing
//!
//! Joint angle uses the difference of two atan2 bearings from the hinge,
//! folded into [0, 180].

use crate::pose::Point;

/// Euclidean distance in pixels
pub fn distance(p1: Point, p2: Point) -> f32 {
    (p2.to_vector() - p1.to_vector()).norm()
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Angle at vertex `b` between rays b→a and b→c, in degrees
///
/// Returns a value in [0, 180]:
/// - 180° = straight limb
/// - small values = tightly folded
pub fn angle_at(a: Point, b: Point, c: Point) -> f32 {
    let to_c = (c.y - b.y).atan2(c.x - b.x);
    let to_a = (a.y - b.y).atan2(a.x - b.x);

    let mut angle = (to_c - to_a).to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }

    // atan2 differences stay within [0, 360], guard float edge cases anyway
    angle.clamp(0.0, 180.0)
}

/// Single-pole exponential smoothing
///
/// Cold start: with no previous value the current sample passes through.
pub fn ema(current: f32, previous: Option<f32>, alpha: f32) -> f32 {
    match previous {
        Some(prev) => alpha * current + (1.0 - alpha) * prev,
        None => current,
    }
}
