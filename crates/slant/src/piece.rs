//! Pieces: an image placed in one area under an affine transform.
//!
//! - `base_fit`: "cover" fit of the image rectangle over the area's bounding
//!   box (uniform scale, centered).
//! - Gesture edits (`translate`, `zoom`) compose onto the snapshot taken by
//!   `prepare`, so repeated calls with cumulative gesture values do not drift.

use tracing::warn;

use crate::geom2::{Aff2, Point, SlantCfg, Size2};
use crate::mesh::Area;

/// Affine map that makes an image of natural `size` cover `area`'s bounding
/// box, centered on it.
///
/// The scale is `max(aw/iw, ah/ih)`, clamped into
/// `[cfg.min_fit_scale, cfg.max_fit_scale]`; non-finite ratios (zero-sized
/// image) take the upper bound, so the result is always finite.
pub fn base_fit(size: Size2, area: &Area, cfg: &SlantCfg) -> Aff2 {
    let r = area.bounding_rect();
    let sx = r.width() / size.width;
    let sy = r.height() / size.height;
    let raw = sx.max(sy);
    let scale = if raw.is_finite() {
        raw.clamp(cfg.min_fit_scale, cfg.max_fit_scale)
    } else {
        warn!(
            width = size.width,
            height = size.height,
            "degenerate fit; scale clamped"
        );
        cfg.max_fit_scale
    };
    let half = Point::new(size.width, size.height) * (0.5 * scale);
    let half = if half.iter().all(|v| v.is_finite()) {
        half
    } else {
        Point::zeros()
    };
    let c = r.center();
    Aff2 {
        m: nalgebra::Matrix2::identity() * scale,
        t: c - half,
    }
}

/// An image handle `I` placed into area `area`.
#[derive(Clone, Debug)]
pub struct Piece<I> {
    pub image: I,
    pub size: Size2,
    pub area: usize,
    transform: Aff2,
    base: Aff2,
    previous: Aff2,
    /// Bounds for the uniform scale `sqrt|det m|` reachable by `zoom`.
    min_scale: f64,
    max_scale: f64,
}

impl<I> Piece<I> {
    /// New piece fitted into `area`.
    pub fn new(image: I, size: Size2, area: &Area, cfg: &SlantCfg) -> Self {
        let base = base_fit(size, area, cfg);
        Self {
            image,
            size,
            area: area.index,
            transform: base,
            base,
            previous: base,
            min_scale: cfg.min_fit_scale,
            max_scale: cfg.max_fit_scale,
        }
    }

    /// Current image-to-view transform.
    #[inline]
    pub fn transform(&self) -> Aff2 {
        self.transform
    }

    /// Fit computed from the area geometry alone.
    #[inline]
    pub fn base(&self) -> Aff2 {
        self.base
    }

    /// Recompute the base fit for the area's new shape and reset the
    /// transform to it.
    pub fn refit(&mut self, area: &Area, cfg: &SlantCfg) {
        self.base = base_fit(self.size, area, cfg);
        self.transform = self.base;
        self.previous = self.base;
        self.min_scale = cfg.min_fit_scale;
        self.max_scale = cfg.max_fit_scale;
    }

    /// Snapshot the transform at gesture start.
    #[inline]
    pub fn prepare(&mut self) {
        self.previous = self.transform;
    }

    /// Snapshot followed by a view-space translation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = Aff2::translation(dx, dy).compose(&self.previous);
    }

    /// Snapshot followed by a scale about the view-space `pivot`.
    ///
    /// The resulting uniform scale stays within the fit scale bounds, so a
    /// pinch down to coincident pointers leaves an invertible transform.
    /// Non-finite factors are ignored.
    pub fn zoom(&mut self, sx: f64, sy: f64, pivot: Point) {
        if !(sx.is_finite() && sy.is_finite()) {
            return;
        }
        let prev = self.previous.m.determinant().abs().sqrt();
        if !(prev > 0.0) {
            return;
        }
        let (sx, sy) = (sx.max(0.0), sy.max(0.0));
        let next = prev * (sx * sy).sqrt();
        let target = next.clamp(self.min_scale, self.max_scale);
        let (sx, sy) = if next == target {
            (sx, sy)
        } else if next > 0.0 {
            let f = target / next;
            (sx * f, sy * f)
        } else {
            let f = target / prev;
            (f, f)
        };
        if next != target {
            warn!(requested = next, applied = target, "zoom clamped");
        }
        self.transform = Aff2::scaling_about(sx, sy, pivot).compose(&self.previous);
    }

    /// Whether view-space `p` falls on the transformed image rectangle.
    pub fn contains_point(&self, p: Point) -> bool {
        match self.transform.inverse() {
            Some(inv) => self.size.rect().contains_eps(inv.apply(p), 0.0),
            None => false,
        }
    }

    /// Image corners in view space (top-left, top-right, bottom-right, bottom-left).
    pub fn corners(&self) -> [Point; 4] {
        self.size.rect().corners().map(|c| self.transform.apply(c))
    }
}
