//! Basic 2D types and tolerances shared by the mesh and the piece transforms.
//!
//! - `SlantCfg`: centralizes epsilons, hit tolerances, and clamp bounds.
//! - `Aff2`: 2D affine map used for piece transforms.
//! - `Rect`, `Size2`: axis-aligned boundary and natural image size.
//!
//! View space is y-down: `top < bottom`, `left < right`.

use nalgebra::{Matrix2, Vector2};

/// A point (or vector) in view space.
pub type Point = Vector2<f64>;

/// Default hit-test half width for line dragging, in view units.
pub const DEFAULT_LINE_HIT_TOLERANCE: f64 = 20.0;
/// Default minimum edge length an area may shrink to while a line is dragged.
pub const DEFAULT_MIN_CELL_EXTENT: f64 = 8.0;

/// Geometry and interaction configuration.
#[derive(Clone, Copy, Debug)]
pub struct SlantCfg {
    /// Parallel threshold for `intersect` (|cross| of the two directions).
    pub eps_det: f64,
    /// Slack for convexity/containment checks.
    pub eps_feas: f64,
    /// Half width of the band around a line that counts as a hit.
    pub line_hit_tolerance: f64,
    /// Smallest edge length an area may have after a drag.
    pub min_cell_extent: f64,
    /// Bisection steps used when clamping a drag offset.
    pub clamp_steps: u32,
    /// Lower bound for the base-fit scale.
    pub min_fit_scale: f64,
    /// Upper bound for the base-fit scale (degenerate areas or images).
    pub max_fit_scale: f64,
}

impl Default for SlantCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-12,
            eps_feas: 1e-9,
            line_hit_tolerance: DEFAULT_LINE_HIT_TOLERANCE,
            min_cell_extent: DEFAULT_MIN_CELL_EXTENT,
            clamp_steps: 40,
            min_fit_scale: 1e-6,
            max_fit_scale: 1e6,
        }
    }
}

/// Axis-aligned rectangle in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[inline]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
    /// Rectangle from an origin and a size.
    #[inline]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.left + self.right),
            0.5 * (self.top + self.bottom),
        )
    }
    /// Corners in clockwise (y-down) order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }
    #[inline]
    pub fn contains_eps(&self, p: Point, eps: f64) -> bool {
        p.x >= self.left - eps
            && p.x <= self.right + eps
            && p.y >= self.top - eps
            && p.y <= self.bottom + eps
    }
    /// Smallest rectangle containing all points. None for an empty slice.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut r = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            r.left = r.left.min(p.x);
            r.top = r.top.min(p.y);
            r.right = r.right.max(p.x);
            r.bottom = r.bottom.max(p.y);
        }
        Some(r)
    }
}

/// A directed segment `start → end`, e.g. one drawn mesh line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Natural size of a source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size2 {
    pub width: f64,
    pub height: f64,
}

impl Size2 {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    /// The image's own rectangle `[0, w] × [0, h]`.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aff2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Aff2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Aff2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::new(dx, dy),
        }
    }
    /// Scale by `(sx, sy)` keeping `pivot` fixed.
    #[inline]
    pub fn scaling_about(sx: f64, sy: f64, pivot: Point) -> Self {
        let m = Matrix2::new(sx, 0.0, 0.0, sy);
        Self {
            m,
            t: pivot - m * pivot,
        }
    }
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.m * p + self.t
    }
    /// `self ∘ other`: apply `other` first, then `self`.
    #[inline]
    pub fn compose(&self, other: &Aff2) -> Aff2 {
        Aff2 {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite()) && self.t.iter().all(|v| v.is_finite())
    }
}
