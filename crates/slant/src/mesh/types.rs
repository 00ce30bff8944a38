//! Data types for the line mesh.
//!
//! Kept small and explicit so `line`, `build`, and `area` read easily.

use crate::geom2::Point;

/// Arena index of a line inside a `Mesh`. Indices `0..4` are the outer
/// boundary (see `Side`); interior lines follow in template order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// Number of fixed outer lines at the front of the arena.
pub const OUTER_LINES: usize = 4;

impl LineId {
    /// Arena id of interior template line `k`.
    #[inline]
    pub fn interior(k: usize) -> Self {
        LineId(OUTER_LINES + k)
    }
    #[inline]
    pub fn is_outer(self) -> bool {
        self.0 < OUTER_LINES
    }
}

/// Line family. Closed set; behavior switches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// start = left point, end = right point; moves along y.
    Horizontal,
    /// start = top point, end = bottom point; moves along x.
    Vertical,
}

impl Direction {
    /// Unit vector of the movement axis.
    #[inline]
    pub fn axis(self) -> Point {
        match self {
            Direction::Horizontal => Point::new(0.0, 1.0),
            Direction::Vertical => Point::new(1.0, 0.0),
        }
    }
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
    /// Outer side an unattached `start` is clamped to.
    #[inline]
    pub fn start_side(self) -> Side {
        match self {
            Direction::Horizontal => Side::Left,
            Direction::Vertical => Side::Top,
        }
    }
    /// Outer side an unattached `end` is clamped to.
    #[inline]
    pub fn end_side(self) -> Side {
        match self {
            Direction::Horizontal => Side::Right,
            Direction::Vertical => Side::Bottom,
        }
    }
}

/// Sides of the outer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

    #[inline]
    pub fn line_id(self) -> LineId {
        match self {
            Side::Left => LineId(0),
            Side::Top => LineId(1),
            Side::Right => LineId(2),
            Side::Bottom => LineId(3),
        }
    }
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Side::Left | Side::Right => Direction::Vertical,
            Side::Top | Side::Bottom => Direction::Horizontal,
        }
    }
}

/// A movable mesh line.
///
/// Attachments are arena indices into the owning mesh (non-owning peers).
/// `None` means the endpoint sits on the outer boundary side given by
/// `Direction::{start_side, end_side}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    /// Snapshot taken by `prepare_move`; drags are relative to it.
    pub previous_start: Point,
    pub previous_end: Point,
    pub direction: Direction,
    pub attach_start: Option<LineId>,
    pub attach_end: Option<LineId>,
}

/// The four lines bounding an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaBounds {
    pub left: LineId,
    pub top: LineId,
    pub right: LineId,
    pub bottom: LineId,
}

impl AreaBounds {
    #[inline]
    pub fn contains(&self, id: LineId) -> bool {
        self.left == id || self.top == id || self.right == id || self.bottom == id
    }
}
