use super::types::Point;

/// 2D cross product `u × v`. Positive when `v` turns clockwise from `u` in
/// y-down view space (counterclockwise in y-up math space).
#[inline]
pub fn cross(u: Point, v: Point) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Intersection of the infinite lines through `a0→a1` and `b0→b1`.
///
/// Returns `None` for parallel or coincident lines (`|cross| <= eps_det`
/// relative to the direction lengths). A well-formed mesh never asks for that.
pub fn intersect(a0: Point, a1: Point, b0: Point, b1: Point, eps_det: f64) -> Option<Point> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = cross(da, db);
    let scale = da.norm() * db.norm();
    if !denom.is_finite() || scale <= 0.0 || denom.abs() <= eps_det * scale {
        return None;
    }
    let s = cross(b0 - a0, db) / denom;
    Some(a0 + da * s)
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).norm()
}

#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

/// True iff every edge of the closed polygon `poly` sees `p` on its
/// non-negative cross side (clockwise order in y-down space), with slack `eps`.
pub fn convex_contains(poly: &[Point], p: Point, eps: f64) -> bool {
    if poly.len() < 3 {
        return false;
    }
    (0..poly.len()).all(|k| {
        let a = poly[k];
        let b = poly[(k + 1) % poly.len()];
        cross(b - a, p - a) >= -eps
    })
}

/// Shoelace area; positive for clockwise order in y-down space.
pub fn signed_area(poly: &[Point]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    0.5 * (0..n)
        .map(|k| cross(poly[k], poly[(k + 1) % n]))
        .sum::<f64>()
}

/// Area centroid of a simple polygon; falls back to the vertex mean when the
/// area vanishes.
pub fn centroid(poly: &[Point]) -> Option<Point> {
    if poly.is_empty() {
        return None;
    }
    let a = signed_area(poly);
    if a.abs() <= 1e-12 {
        let sum = poly.iter().fold(Point::zeros(), |acc, p| acc + p);
        return Some(sum / poly.len() as f64);
    }
    let n = poly.len();
    let mut c = Point::zeros();
    for k in 0..n {
        let p = poly[k];
        let q = poly[(k + 1) % n];
        c += (p + q) * cross(p, q);
    }
    Some(c / (6.0 * a))
}
