use metromap::geometry::Point;
use metromap::path::{SMOOTH_SAMPLES, bezier_point, build_path, metro_path, simplify_colinear, smooth_path};
use metromap::model::Smoothing;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn on_segment(q: Point, a: Point, b: Point) -> bool {
    let cross = (b.x - a.x) * (q.y - a.y) - (b.y - a.y) * (q.x - a.x);
    let within = q.x >= a.x.min(b.x) - 1e-9
        && q.x <= a.x.max(b.x) + 1e-9
        && q.y >= a.y.min(b.y) - 1e-9
        && q.y <= a.y.max(b.y) + 1e-9;
    cross.abs() < 1e-9 && within
}

fn metro_inputs() -> Vec<Vec<Point>> {
    vec![
        vec![p(0.0, 0.0), p(10.0, 4.0)],
        vec![p(0.0, 0.0), p(3.0, -9.0), p(20.0, -9.0)],
        vec![p(100.0, 100.0), p(40.0, 160.0), p(-20.0, 170.0), p(-20.0, 20.0)],
        vec![p(0.0, 0.0), p(0.0, 0.0), p(30.0, 12.0), p(30.0, 12.0)],
        vec![p(5.0, 5.0), p(25.0, 75.0), p(90.0, 80.0), p(10.0, 0.0), p(5.0, 5.0)],
    ]
}

#[test]
fn fewer_than_two_points_pass_through() {
    for mode in [Smoothing::Straight, Smoothing::Smooth, Smoothing::Metro] {
        assert!(build_path(&[], mode).is_empty());
        assert_eq!(build_path(&[p(3.0, 4.0)], mode), vec![p(3.0, 4.0)]);
    }
}

#[test]
fn straight_is_identity() {
    let pts = vec![p(0.0, 0.0), p(13.0, 7.5), p(13.0, 7.5), p(-2.0, 40.0)];
    assert_eq!(build_path(&pts, Smoothing::Straight), pts);
}

#[test]
fn metro_segments_are_axis_aligned_or_diagonal() {
    for input in metro_inputs() {
        let out = build_path(&input, Smoothing::Metro);
        for w in out.windows(2) {
            let dx = w[1].x - w[0].x;
            let dy = w[1].y - w[0].y;
            assert!(
                dx == 0.0 || dy == 0.0 || dx.abs() == dy.abs(),
                "segment {:?} -> {:?} in {out:?}",
                w[0],
                w[1]
            );
        }
    }
}

#[test]
fn metro_visits_every_input_point_in_order() {
    for input in metro_inputs() {
        let out = build_path(&input, Smoothing::Metro);
        assert_eq!(out.first(), input.first());
        assert_eq!(out.last(), input.last());
        // Each input point lies on the path, at or after the segment of the previous one.
        let mut seg = 0;
        for q in &input {
            while seg + 1 < out.len() && !on_segment(*q, out[seg], out[seg + 1]) {
                seg += 1;
            }
            assert!(seg + 1 < out.len(), "{q:?} not on {out:?}");
        }
    }
}

#[test]
fn metro_drops_colinear_points() {
    let out = metro_path(&[p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0)]);
    assert_eq!(out, vec![p(0.0, 0.0), p(10.0, 0.0)]);
}

#[test]
fn metro_keeps_real_bends() {
    let out = metro_path(&[p(0.0, 0.0), p(10.0, 4.0)]);
    assert_eq!(out, vec![p(0.0, 0.0), p(4.0, 4.0), p(10.0, 4.0)]);
}

#[test]
fn simplify_keeps_endpoints() {
    assert_eq!(simplify_colinear(&[p(1.0, 1.0), p(2.0, 2.0)]), vec![p(1.0, 1.0), p(2.0, 2.0)]);
    let out = simplify_colinear(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(2.0, 5.0)]);
    assert_eq!(out, vec![p(0.0, 0.0), p(2.0, 2.0), p(2.0, 5.0)]);
}

#[test]
fn smooth_two_points_gives_one_sampled_segment() {
    let a = p(0.0, 0.0);
    let b = p(10.0, 20.0);
    let out = build_path(&[a, b], Smoothing::Smooth);
    assert_eq!(out.len(), SMOOTH_SAMPLES);
    assert_eq!(out[0], a);
    assert_eq!(out[SMOOTH_SAMPLES - 1], b);
    // Both tangents clamp to the segment itself.
    let c1 = p(2.0, 4.0);
    let c2 = p(8.0, 16.0);
    for (i, q) in out.iter().enumerate() {
        let expected = bezier_point(a, c1, c2, b, i as f64 / 10.0);
        assert!((q.x - expected.x).abs() < 1e-9 && (q.y - expected.y).abs() < 1e-9);
    }
}

#[test]
fn smooth_segments_share_endpoints() {
    let pts = [p(0.0, 0.0), p(50.0, 10.0), p(80.0, 60.0)];
    let out = smooth_path(&pts);
    assert_eq!(out.len(), 2 * SMOOTH_SAMPLES);
    assert_eq!(out[SMOOTH_SAMPLES - 1], out[SMOOTH_SAMPLES]);
    assert_eq!(out[SMOOTH_SAMPLES], pts[1]);
}

#[test]
fn repeated_points_do_not_produce_nan() {
    let pts = [p(4.0, 4.0), p(4.0, 4.0), p(4.0, 4.0)];
    for mode in [Smoothing::Straight, Smoothing::Smooth, Smoothing::Metro] {
        let out = build_path(&pts, mode);
        assert!(!out.is_empty());
        assert!(out.iter().all(|q| q.x.is_finite() && q.y.is_finite()), "{mode}: {out:?}");
    }
}

#[test]
fn metro_diagonals_hold_for_fractional_inputs() {
    let input = [
        p(-409.1937, -246.6921),
        p(433.8311, -300.157),
        p(12.75, 88.125),
        p(0.1, 0.3),
        p(150.35, 150.55),
    ];
    let out = build_path(&input, Smoothing::Metro);
    assert_eq!(out.first(), input.first());
    assert_eq!(out.last(), input.last());
    for w in out.windows(2) {
        let dx = (w[1].x - w[0].x).abs();
        let dy = (w[1].y - w[0].y).abs();
        let tolerance = 1e-9 * dx.max(dy).max(1.0);
        assert!(
            dx == 0.0 || dy == 0.0 || (dx - dy).abs() <= tolerance,
            "segment {:?} -> {:?} in {out:?}",
            w[0],
            w[1]
        );
    }
}
