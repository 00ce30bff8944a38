//! Per-line operations: hit testing, gesture snapshot, move, and endpoint update.
//!
//! Gesture state machine per drag: `Idle → prepare_move → (move_by + mesh
//! update)* → Idle`. A single line never keeps the mesh consistent on its
//! own; `Mesh::update` runs the ordered propagation pass.

use crate::geom2::{convex_contains, intersect, Point, Segment};

use super::types::{Direction, Line, LineId};

impl Line {
    /// New line with the snapshot equal to the current endpoints.
    pub fn new(start: Point, end: Point, direction: Direction) -> Self {
        Self {
            start,
            end,
            previous_start: start,
            previous_end: end,
            direction,
            attach_start: None,
            attach_end: None,
        }
    }

    pub fn with_attachments(mut self, start: Option<LineId>, end: Option<LineId>) -> Self {
        self.attach_start = start;
        self.attach_end = end;
        self
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[inline]
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    /// Band of half width `tolerance` around the segment, offset along the
    /// family's movement axis, in clockwise (y-down) order.
    fn hit_quad(&self, tolerance: f64) -> [Point; 4] {
        let off = self.direction.axis() * tolerance;
        match self.direction {
            Direction::Horizontal => [
                self.start - off,
                self.end - off,
                self.end + off,
                self.start + off,
            ],
            Direction::Vertical => [
                self.start - off,
                self.start + off,
                self.end + off,
                self.end - off,
            ],
        }
    }

    /// True if `p` lies inside the band of half width `tolerance` around the
    /// segment. The band border counts as inside, so every point of the
    /// segment hits for any positive tolerance.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        if !(tolerance > 0.0) {
            return false;
        }
        // Relative slack absorbs rounding for points sampled on the segment.
        let slack = 1e-9 * tolerance * (1.0 + self.length());
        convex_contains(&self.hit_quad(tolerance), p, slack)
    }

    /// Snapshot the endpoints; must precede `move_by` in a gesture.
    pub fn prepare_move(&mut self) {
        self.previous_start = self.start;
        self.previous_end = self.end;
    }

    /// Place the line at `offset` from its snapshot along the movement axis.
    ///
    /// Repeated calls with the cumulative gesture offset are idempotent.
    pub fn move_by(&mut self, offset: f64) {
        let shift = self.direction.axis() * offset;
        self.start = self.previous_start + shift;
        self.end = self.previous_end + shift;
    }

    /// Recompute both endpoints as intersections with the attached segments.
    ///
    /// Returns false if either pair is degenerate (parallel); that endpoint
    /// keeps its previous value.
    pub fn update(&mut self, attach_start: Segment, attach_end: Segment, eps_det: f64) -> bool {
        let start = intersect(
            self.start,
            self.end,
            attach_start.start,
            attach_start.end,
            eps_det,
        );
        let end = intersect(
            self.start,
            self.end,
            attach_end.start,
            attach_end.end,
            eps_det,
        );
        if let Some(s) = start {
            self.start = s;
        }
        if let Some(e) = end {
            self.end = e;
        }
        start.is_some() && end.is_some()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            self.direction, self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}
