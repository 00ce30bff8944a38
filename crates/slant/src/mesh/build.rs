//! The mesh: outer boundary, interior lines, ordered update propagation,
//! derived areas, hit testing, and clamped drags.

use tracing::{debug, warn};

use crate::error::LayoutError;
use crate::geom2::{intersect, Point, Rect, Segment, SlantCfg};

use super::area::Area;
use super::template::{Bound, LayoutTemplate};
use super::types::{AreaBounds, Direction, Line, LineId, Side, OUTER_LINES};

/// Active drag bookkeeping set by `prepare_move`.
#[derive(Clone, Copy, Debug)]
struct DragState {
    line: LineId,
    /// Edge floor for areas touching the line; never above their size at
    /// gesture start, so an already-small cell can still be dragged.
    min_extent: f64,
}

/// Line mesh over a rectangular outer boundary.
///
/// Invariants (after `build`/`layout`/`update`):
/// - arena slots `0..4` are the outer lines, fixed during drags;
/// - every interior endpoint is the intersection with its attachment (or the
///   outer side it defaults to);
/// - `order` lists interior lines so attachments are updated before their
///   dependents, hence one pass converges.
#[derive(Clone, Debug)]
pub struct Mesh {
    lines: Vec<Line>,
    template: LayoutTemplate,
    order: Vec<LineId>,
    outer: Rect,
    cfg: SlantCfg,
    drag: Option<DragState>,
}

impl Mesh {
    /// Mesh with no lines; `load` or `build` populate it.
    pub fn empty(outer: Rect, cfg: SlantCfg) -> Self {
        Self {
            lines: Vec::new(),
            template: LayoutTemplate::default(),
            order: Vec::new(),
            outer,
            cfg,
            drag: None,
        }
    }

    /// Validate `template`, wire attachments, and lay lines out in `outer`.
    /// Deterministic for equal inputs.
    pub fn build(
        template: &LayoutTemplate,
        outer: Rect,
        cfg: SlantCfg,
    ) -> Result<Self, LayoutError> {
        let mut mesh = Self::empty(outer, cfg);
        mesh.load(template)?;
        Ok(mesh)
    }

    /// Replace the current layout with `template`. On error the mesh is left
    /// unchanged.
    pub fn load(&mut self, template: &LayoutTemplate) -> Result<(), LayoutError> {
        check_boundary(self.outer)?;
        let order = template.validate()?;
        self.order = order.into_iter().map(LineId::interior).collect();
        self.template = template.clone();
        self.lines = outer_lines(self.outer).to_vec();
        self.lines.extend(template.lines.iter().map(|spec| {
            Line::new(Point::zeros(), Point::zeros(), spec.direction).with_attachments(
                spec.attach_start.map(LineId::interior),
                spec.attach_end.map(LineId::interior),
            )
        }));
        self.drag = None;
        self.layout();
        debug!(
            lines = template.lines.len(),
            areas = template.areas.len(),
            "mesh built"
        );
        Ok(())
    }

    /// Replace the four outer lines. Call `layout` to re-derive the interior.
    pub fn set_outer_boundary(&mut self, outer: Rect) -> Result<(), LayoutError> {
        check_boundary(outer)?;
        self.outer = outer;
        if self.lines.len() >= OUTER_LINES {
            self.lines[..OUTER_LINES].clone_from_slice(&outer_lines(outer));
        }
        Ok(())
    }

    /// Place interior lines from the template ratios, then propagate.
    pub fn layout(&mut self) {
        let o = self.outer;
        let (w, h) = (o.width(), o.height());
        for (k, spec) in self.template.lines.iter().enumerate() {
            let (p0, p1) = match spec.direction {
                Direction::Horizontal => (
                    Point::new(o.left, o.top + spec.start_ratio * h),
                    Point::new(o.right, o.top + spec.end_ratio * h),
                ),
                Direction::Vertical => (
                    Point::new(o.left + spec.start_ratio * w, o.top),
                    Point::new(o.left + spec.end_ratio * w, o.bottom),
                ),
            };
            let line = &mut self.lines[OUTER_LINES + k];
            line.start = p0;
            line.end = p1;
        }
        self.update();
        for line in &mut self.lines {
            line.prepare_move();
        }
    }

    /// One ordered propagation pass over all interior lines.
    pub fn update(&mut self) {
        for i in 0..self.order.len() {
            let id = self.order[i];
            let (s, e) = self.attachment_segments(id);
            let eps = self.cfg.eps_det;
            let line = &mut self.lines[id.0];
            if !line.update(s, e, eps) {
                warn!(line = id.0, "degenerate attachment; endpoint kept");
            }
        }
    }

    fn attachment_segments(&self, id: LineId) -> (Segment, Segment) {
        let line = &self.lines[id.0];
        let s = line
            .attach_start
            .unwrap_or_else(|| line.direction.start_side().line_id());
        let e = line
            .attach_end
            .unwrap_or_else(|| line.direction.end_side().line_id());
        (self.lines[s.0].segment(), self.lines[e.0].segment())
    }

    /// Drop all lines and derived areas; the mesh is empty until `load`.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.order.clear();
        self.template = LayoutTemplate::default();
        self.drag = None;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn outer(&self) -> Rect {
        self.outer
    }

    #[inline]
    pub fn cfg(&self) -> &SlantCfg {
        &self.cfg
    }

    /// Outer boundary lines (left, top, right, bottom); empty after `reset`.
    pub fn outer_lines(&self) -> &[Line] {
        &self.lines[..OUTER_LINES.min(self.lines.len())]
    }

    /// Interior lines in arena order.
    pub fn lines(&self) -> &[Line] {
        &self.lines[OUTER_LINES.min(self.lines.len())..]
    }

    #[inline]
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.0)
    }

    /// Interior line ids in propagation order.
    #[inline]
    pub fn update_order(&self) -> &[LineId] {
        &self.order
    }

    #[inline]
    pub fn area_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.template.areas.len()
        }
    }

    /// Area `index` read off the current line positions.
    pub fn area(&self, index: usize) -> Option<Area> {
        if self.is_empty() {
            return None;
        }
        let spec = self.template.areas.get(index)?;
        let bounds = AreaBounds {
            left: bound_id(spec.left),
            top: bound_id(spec.top),
            right: bound_id(spec.right),
            bottom: bound_id(spec.bottom),
        };
        let left = &self.lines[bounds.left.0];
        let top = &self.lines[bounds.top.0];
        let right = &self.lines[bounds.right.0];
        let bottom = &self.lines[bounds.bottom.0];
        let points = [
            self.corner(top, left, top.start),
            self.corner(top, right, top.end),
            self.corner(bottom, right, bottom.end),
            self.corner(bottom, left, bottom.start),
        ];
        Some(Area {
            index,
            bounds,
            points,
        })
    }

    fn corner(&self, horizontal: &Line, vertical: &Line, fallback: Point) -> Point {
        intersect(
            horizontal.start,
            horizontal.end,
            vertical.start,
            vertical.end,
            self.cfg.eps_det,
        )
        .unwrap_or_else(|| {
            warn!("degenerate area corner; using line endpoint");
            fallback
        })
    }

    /// All areas in template order (the piece-addition order).
    pub fn areas(&self) -> Vec<Area> {
        (0..self.area_count()).filter_map(|i| self.area(i)).collect()
    }

    /// First interior line whose hit band contains `p`.
    pub fn line_near(&self, p: Point, tolerance: f64) -> Option<LineId> {
        let found = (OUTER_LINES..self.lines.len())
            .find(|&i| self.lines[i].contains_point(p, tolerance))
            .map(LineId);
        if let Some(id) = found {
            debug!(line = %self.lines[id.0], "line hit");
        }
        found
    }

    /// Snapshot line `id` for a drag gesture.
    pub fn prepare_move(&mut self, id: LineId) {
        if id.is_outer() || id.0 >= self.lines.len() {
            return;
        }
        self.lines[id.0].prepare_move();
        let smallest = self
            .areas()
            .iter()
            .filter(|a| a.touches(id))
            .map(Area::min_edge)
            .fold(f64::INFINITY, f64::min);
        self.drag = Some(DragState {
            line: id,
            min_extent: self.cfg.min_cell_extent.min(smallest - self.cfg.eps_feas),
        });
    }

    /// Move line `id` to `offset` from its snapshot and propagate.
    ///
    /// If the move would invert or collapse a touching area, the offset is
    /// bisected back toward the snapshot until every such area is valid.
    /// Returns the offset actually applied. Outer lines never move.
    pub fn move_line(&mut self, id: LineId, offset: f64) -> f64 {
        if id.is_outer() || id.0 >= self.lines.len() || !offset.is_finite() {
            return 0.0;
        }
        let min_extent = match self.drag {
            Some(d) if d.line == id => d.min_extent,
            _ => self.cfg.min_cell_extent,
        };
        // Beyond one boundary extent every touching cell has collapsed.
        let extent = match self.lines[id.0].direction {
            Direction::Horizontal => self.outer.height(),
            Direction::Vertical => self.outer.width(),
        };
        let offset = offset.clamp(-extent, extent);
        self.shift(id, offset);
        if self.touching_areas_valid(id, min_extent) {
            return offset;
        }
        let (mut lo, mut hi) = (0.0, offset);
        for _ in 0..self.cfg.clamp_steps {
            let mid = 0.5 * (lo + hi);
            self.shift(id, mid);
            if self.touching_areas_valid(id, min_extent) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        self.shift(id, lo);
        debug!(line = id.0, requested = offset, applied = lo, "drag clamped");
        lo
    }

    fn shift(&mut self, id: LineId, offset: f64) {
        self.lines[id.0].move_by(offset);
        self.update();
    }

    fn touching_areas_valid(&self, id: LineId, min_extent: f64) -> bool {
        self.areas()
            .iter()
            .filter(|a| a.touches(id))
            .all(|a| a.is_valid(min_extent, self.cfg.eps_feas))
    }

    /// Clear the drag bookkeeping (pointer up).
    pub fn finish_move(&mut self) {
        self.drag = None;
    }
}

fn bound_id(b: Bound) -> LineId {
    match b {
        Bound::Outer(side) => side.line_id(),
        Bound::Line(k) => LineId::interior(k),
    }
}

fn check_boundary(outer: Rect) -> Result<(), LayoutError> {
    let (width, height) = (outer.width(), outer.height());
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(LayoutError::DegenerateBoundary { width, height });
    }
    Ok(())
}

/// Outer lines in `Side::ALL` order, oriented like interior lines.
fn outer_lines(o: Rect) -> [Line; 4] {
    let [tl, tr, br, bl] = o.corners();
    Side::ALL.map(|side| match side {
        Side::Left => Line::new(tl, bl, Direction::Vertical),
        Side::Top => Line::new(tl, tr, Direction::Horizontal),
        Side::Right => Line::new(tr, br, Direction::Vertical),
        Side::Bottom => Line::new(bl, br, Direction::Horizontal),
    })
}
