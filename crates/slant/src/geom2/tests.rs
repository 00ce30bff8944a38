use super::*;
use nalgebra::vector;

#[test]
fn cross_sign_follows_turn_direction() {
    let right = vector![1.0, 0.0];
    let down = vector![0.0, 1.0];
    // y-down: right → down is a clockwise turn on screen.
    assert!(cross(right, down) > 0.0);
    assert!(cross(down, right) < 0.0);
    assert_eq!(cross(right, right * 3.0), 0.0);
}

#[test]
fn intersect_orthogonal_and_slanted() {
    let eps = SlantCfg::default().eps_det;
    let p = intersect(
        vector![0.0, 5.0],
        vector![10.0, 5.0],
        vector![3.0, 0.0],
        vector![3.0, 10.0],
        eps,
    )
    .unwrap();
    assert!((p - vector![3.0, 5.0]).norm() < 1e-12);

    // y = x and y = 10 - x meet at (5, 5); segments need not overlap.
    let q = intersect(
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 10.0],
        vector![1.0, 9.0],
        eps,
    )
    .unwrap();
    assert!((q - vector![5.0, 5.0]).norm() < 1e-12);
}

#[test]
fn intersect_parallel_is_none() {
    let eps = SlantCfg::default().eps_det;
    assert!(intersect(
        vector![0.0, 0.0],
        vector![10.0, 1.0],
        vector![0.0, 5.0],
        vector![10.0, 6.0],
        eps
    )
    .is_none());
    // coincident
    assert!(intersect(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![5.0, 0.0],
        eps
    )
    .is_none());
    // zero-length direction
    assert!(intersect(
        vector![1.0, 1.0],
        vector![1.0, 1.0],
        vector![0.0, 0.0],
        vector![0.0, 5.0],
        eps
    )
    .is_none());
}

#[test]
fn distance_and_midpoint() {
    let a = vector![0.0, 0.0];
    let b = vector![3.0, 4.0];
    assert!((distance(a, b) - 5.0).abs() < 1e-12);
    assert!((midpoint(a, b) - vector![1.5, 2.0]).norm() < 1e-12);
}

#[test]
fn polygon_helpers_on_unit_square() {
    let sq = Rect::from_size(2.0, 2.0).corners();
    assert!((signed_area(&sq) - 4.0).abs() < 1e-12);
    assert!((centroid(&sq).unwrap() - vector![1.0, 1.0]).norm() < 1e-12);
    assert!(convex_contains(&sq, vector![1.0, 1.0], 0.0));
    assert!(convex_contains(&sq, vector![2.0, 0.5], 0.0));
    assert!(!convex_contains(&sq, vector![2.1, 0.5], 0.0));
    assert!(!convex_contains(&sq[..2], vector![1.0, 0.0], 0.0));
}

#[test]
fn aff2_compose_inverse_and_pivot_scaling() {
    let t = Aff2::translation(2.0, -1.0);
    let s = Aff2::scaling_about(2.0, 3.0, vector![1.0, 1.0]);
    // pivot is fixed
    assert!((s.apply(vector![1.0, 1.0]) - vector![1.0, 1.0]).norm() < 1e-12);
    // t ∘ s applies s first
    let ts = t.compose(&s);
    let p = vector![2.0, 2.0];
    assert!((ts.apply(p) - t.apply(s.apply(p))).norm() < 1e-12);
    let inv = ts.inverse().unwrap();
    assert!((inv.apply(ts.apply(p)) - p).norm() < 1e-12);
    // singular
    let flat = Aff2::scaling_about(0.0, 1.0, vector![0.0, 0.0]);
    assert!(flat.inverse().is_none());
}

#[test]
fn rect_bounding_and_contains() {
    let pts = [vector![3.0, 1.0], vector![-1.0, 4.0], vector![2.0, -2.0]];
    let r = Rect::bounding(&pts).unwrap();
    assert_eq!(r, Rect::new(-1.0, -2.0, 3.0, 4.0));
    assert!(r.contains_eps(vector![0.0, 0.0], 0.0));
    assert!(!r.contains_eps(vector![3.5, 0.0], 0.1));
    assert!(Rect::bounding(&[]).is_none());
}
