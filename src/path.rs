//! Turning an ordered list of station positions into a strokeable path.
//!
//! All functions are space-agnostic: callers pass view-space points for the
//! interactive canvas and export-space points for rasterization, and get
//! points in the same space back.
//!
//! - [`Smoothing::Straight`]: the input unchanged.
//! - [`Smoothing::Smooth`]: one cubic Bezier per consecutive pair with
//!   Catmull-Rom style tangents, each sampled at 11 parameter values.
//! - [`Smoothing::Metro`]: horizontal, vertical and exact 45° segments only,
//!   passing through every input point, followed by removal of colinear bends.

use crate::geometry::Point;
use crate::model::Smoothing;

/// Tangent weight of the Bezier control points.
pub const SMOOTH_TENSION: f64 = 0.2;
/// Samples per Bezier segment, both endpoints included.
pub const SMOOTH_SAMPLES: usize = 11;
/// A diagonal step that lands this close to the target (on both axes) snaps onto it.
pub const METRO_SNAP: f64 = 1.0;

/// Build the path for `points` in the given style.
///
/// Fewer than two points are returned unchanged.
pub fn build_path(points: &[Point], smoothing: Smoothing) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    match smoothing {
        Smoothing::Straight => points.to_vec(),
        Smoothing::Smooth => smooth_path(points),
        Smoothing::Metro => metro_path(points),
    }
}

/// Evaluate the cubic Bezier `p1, c1, c2, p2` at `t`.
pub fn bezier_point(p1: Point, c1: Point, c2: Point, p2: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;
    Point::new(
        mt3 * p1.x + 3.0 * mt2 * t * c1.x + 3.0 * mt * t2 * c2.x + t3 * p2.x,
        mt3 * p1.y + 3.0 * mt2 * t * c1.y + 3.0 * mt * t2 * c2.y + t3 * p2.y,
    )
}

/// Control points of the segment `points[i] -> points[i + 1]`.
///
/// The missing neighbour at either end is replaced by the segment endpoint
/// itself, which flattens the tangent there.
fn control_points(points: &[Point], i: usize) -> (Point, Point) {
    let p1 = points[i];
    let p2 = points[i + 1];
    let p0 = if i == 0 { p1 } else { points[i - 1] };
    let p3 = if i + 2 >= points.len() { p2 } else { points[i + 2] };
    let c1 = p1 + (p2 - p0) * SMOOTH_TENSION;
    let c2 = p2 - (p3 - p1) * SMOOTH_TENSION;
    (c1, c2)
}

/// Densely sampled smooth curve through `points`.
///
/// Adjacent segments share an endpoint, which appears twice in the output.
pub fn smooth_path(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let segments = points.len() - 1;
    let mut out = Vec::with_capacity(segments * SMOOTH_SAMPLES);
    for i in 0..segments {
        let (c1, c2) = control_points(points, i);
        for step in 0..SMOOTH_SAMPLES {
            let t = step as f64 / (SMOOTH_SAMPLES - 1) as f64;
            out.push(bezier_point(points[i], c1, c2, points[i + 1], t));
        }
    }
    out
}

/// Route through `points` with 45°/90° turns only, then drop colinear bends.
///
/// Diagonal legs are exactly 45° for integer inputs; with fractional inputs
/// the two axis deltas may differ by floating-point rounding.
pub fn metro_path(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut raw = Vec::with_capacity(points.len() * 3);
    raw.push(points[0]);
    for &target in &points[1..] {
        // `raw` always holds at least the start point.
        let prev = raw[raw.len() - 1];
        metro_leg(&mut raw, prev, target);
    }
    simplify_colinear(&raw)
}

/// Append the points that lead from `prev` to `target`.
fn metro_leg(path: &mut Vec<Point>, prev: Point, target: Point) {
    let dx = target.x - prev.x;
    let dy = target.y - prev.y;

    if dx == 0.0 {
        path.push(Point::new(prev.x, target.y));
        return;
    }
    if dy == 0.0 {
        path.push(Point::new(target.x, prev.y));
        return;
    }

    let distance = dx.abs().min(dy.abs());
    let mid = Point::new(
        prev.x + distance.copysign(dx),
        prev.y + distance.copysign(dy),
    );

    if (mid.x - target.x).abs() < METRO_SNAP && (mid.y - target.y).abs() < METRO_SNAP {
        path.push(target);
        return;
    }

    path.push(mid);
    // The diagonal used up the shorter axis; finish along the other one.
    if mid.x != target.x {
        path.push(Point::new(target.x, mid.y));
    }
    if mid.y != target.y {
        path.push(target);
    }
}

/// Exact colinearity test of `b` between `a` and `c`.
pub fn is_colinear(a: Point, b: Point, c: Point) -> bool {
    (b.x - a.x) * (c.y - a.y) == (c.x - a.x) * (b.y - a.y)
}

/// Drop interior points lying exactly on the line between the last kept point
/// and the next raw point. Endpoints are always kept.
pub fn simplify_colinear(path: &[Point]) -> Vec<Point> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for w in path.windows(3) {
        let (current, next) = (w[1], w[2]);
        let kept = out[out.len() - 1];
        if !is_colinear(kept, current, next) {
            out.push(current);
        }
    }
    out.push(path[path.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn control_points_clamp_at_both_ends() {
        let pts = [p(0.0, 0.0), p(10.0, 0.0)];
        let (c1, c2) = control_points(&pts, 0);
        assert_eq!(c1, p(2.0, 0.0));
        assert_eq!(c2, p(8.0, 0.0));
    }

    #[test]
    fn metro_leg_diagonal_then_horizontal() {
        let mut path = vec![p(0.0, 0.0)];
        metro_leg(&mut path, p(0.0, 0.0), p(10.0, 4.0));
        assert_eq!(path, vec![p(0.0, 0.0), p(4.0, 4.0), p(10.0, 4.0)]);
    }

    #[test]
    fn metro_leg_diagonal_then_vertical() {
        let mut path = vec![p(0.0, 0.0)];
        metro_leg(&mut path, p(0.0, 0.0), p(3.0, -9.0));
        assert_eq!(path, vec![p(0.0, 0.0), p(3.0, -3.0), p(3.0, -9.0)]);
    }

    #[test]
    fn metro_leg_snaps_near_target() {
        let mut path = vec![p(0.0, 0.0)];
        metro_leg(&mut path, p(0.0, 0.0), p(5.0, 5.5));
        assert_eq!(path, vec![p(0.0, 0.0), p(5.0, 5.5)]);
    }
}
