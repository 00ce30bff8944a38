//! Cells derived from the mesh: an ordered quadrilateral plus the ids of the
//! four lines that bound it.

use crate::geom2::{centroid, convex_contains, cross, signed_area, Point, Rect};

use super::types::{AreaBounds, LineId};

/// One cell of the mesh. Recomputed from line positions on every request;
/// it has no identity beyond `index`.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    pub index: usize,
    pub bounds: AreaBounds,
    /// top-left, top-right, bottom-right, bottom-left (clockwise in y-down space).
    pub points: [Point; 4],
}

impl Area {
    /// Edge-by-edge cross test. Defined for convex cells only, which every
    /// well-formed mesh produces.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        convex_contains(&self.points, p, 0.0)
    }

    /// Whether `line` is one of the four bounding lines.
    #[inline]
    pub fn touches(&self, line: LineId) -> bool {
        self.bounds.contains(line)
    }

    pub fn bounding_rect(&self) -> Rect {
        let [tl, tr, br, bl] = self.points;
        Rect::new(
            tl.x.min(bl.x).min(tr.x).min(br.x),
            tl.y.min(tr.y).min(bl.y).min(br.y),
            tl.x.max(bl.x).max(tr.x).max(br.x),
            tl.y.max(tr.y).max(bl.y).max(br.y),
        )
    }

    pub fn centroid(&self) -> Point {
        centroid(&self.points).unwrap_or_else(|| self.bounding_rect().center())
    }

    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Strictly convex in clockwise order with every edge at least
    /// `min_extent` long. Inverted or collapsed cells fail.
    pub fn is_valid(&self, min_extent: f64, eps: f64) -> bool {
        let pts = &self.points;
        (0..4).all(|k| {
            let a = pts[k];
            let b = pts[(k + 1) % 4];
            let c = pts[(k + 2) % 4];
            (b - a).norm() >= min_extent && cross(b - a, c - b) > eps
        })
    }

    /// Shortest edge length.
    pub fn min_edge(&self) -> f64 {
        (0..4)
            .map(|k| (self.points[(k + 1) % 4] - self.points[k]).norm())
            .fold(f64::INFINITY, f64::min)
    }
}
