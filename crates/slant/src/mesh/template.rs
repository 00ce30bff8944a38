//! Layout templates: which lines exist, how they attach, and which four lines
//! bound each area.
//!
//! Positions are ratios of the outer boundary so one template serves every
//! boundary size. A horizontal line passes through `(left, top + r0·h)` and
//! `(right, top + r1·h)`; a vertical line through `(left + r0·w, top)` and
//! `(left + r1·w, bottom)`. Its drawn endpoints are then cut by the
//! attachments.

use crate::error::LayoutError;

use super::types::{Direction, Side};

/// One interior line of a template.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSpec {
    pub direction: Direction,
    pub start_ratio: f64,
    pub end_ratio: f64,
    /// Interior line index the start attaches to; `None` = outer boundary.
    pub attach_start: Option<usize>,
    pub attach_end: Option<usize>,
}

impl LineSpec {
    /// Straight boundary-to-boundary line at `ratio`.
    pub fn straight(direction: Direction, ratio: f64) -> Self {
        Self {
            direction,
            start_ratio: ratio,
            end_ratio: ratio,
            attach_start: None,
            attach_end: None,
        }
    }
}

/// A bounding line reference of an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Outer(Side),
    Line(usize),
}

impl Bound {
    fn outer_or(line: Option<usize>, side: Side) -> Self {
        line.map_or(Bound::Outer(side), Bound::Line)
    }
}

/// The four bounding lines of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaSpec {
    pub left: Bound,
    pub top: Bound,
    pub right: Bound,
    pub bottom: Bound,
}

/// A complete layout: lines (attachment graph) plus cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutTemplate {
    pub lines: Vec<LineSpec>,
    pub areas: Vec<AreaSpec>,
}

impl LayoutTemplate {
    #[inline]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// `rows × cols` grid of full-length crossing lines. Areas row-major.
    pub fn grid(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mut lines = Vec::with_capacity(rows + cols - 2);
        for i in 1..rows {
            lines.push(LineSpec::straight(
                Direction::Horizontal,
                i as f64 / rows as f64,
            ));
        }
        for j in 1..cols {
            lines.push(LineSpec::straight(
                Direction::Vertical,
                j as f64 / cols as f64,
            ));
        }
        let h = |i: usize| (i > 0 && i < rows).then(|| i - 1);
        let v = |j: usize| (j > 0 && j < cols).then(|| rows - 1 + j - 1);
        let mut areas = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                areas.push(AreaSpec {
                    left: Bound::outer_or(v(j), Side::Left),
                    top: Bound::outer_or(h(i), Side::Top),
                    right: Bound::outer_or(v(j + 1), Side::Right),
                    bottom: Bound::outer_or(h(i + 1), Side::Bottom),
                });
            }
        }
        Self { lines, areas }
    }

    /// Full-width horizontal bands; band `i` is split into `cols[i]` cells by
    /// vertical lines attached to the band's top and bottom lines.
    pub fn rows(cols: &[usize]) -> Self {
        Self::bands(Direction::Horizontal, cols, 0.0)
    }

    /// Transpose of `rows`: full-height columns split by horizontal lines.
    pub fn columns(rows: &[usize]) -> Self {
        Self::bands(Direction::Vertical, rows, 0.0)
    }

    /// `rows` with alternately tilted lines. `slant ∈ [0, 0.95]` is the
    /// fraction of the band spacing used for the tilt; neighbors never cross.
    pub fn slant_rows(cols: &[usize], slant: f64) -> Self {
        Self::bands(Direction::Horizontal, cols, slant)
    }

    /// `columns` with alternately tilted lines.
    pub fn slant_columns(rows: &[usize], slant: f64) -> Self {
        Self::bands(Direction::Vertical, rows, slant)
    }

    /// Band layout: `counts.len()` major bands separated by full-length major
    /// lines; band `b` is cut into `counts[b]` cells by minor lines attached
    /// to the band's two major lines. Areas are listed band by band.
    pub(crate) fn bands(major: Direction, counts: &[usize], slant: f64) -> Self {
        let counts: Vec<usize> = if counts.is_empty() {
            vec![1]
        } else {
            counts.iter().map(|&c| c.max(1)).collect()
        };
        let slant = if slant.is_finite() {
            slant.clamp(0.0, 0.95)
        } else {
            0.0
        };
        let minor = major.other();
        let n = counts.len();

        let mut lines = Vec::new();
        for b in 1..n {
            lines.push(tilted(major, b, n, slant));
        }
        let major_line = |b: usize| (b > 0 && b < n).then(|| b - 1);

        let mut areas = Vec::new();
        for (b, &c) in counts.iter().enumerate() {
            let first_minor = lines.len();
            for k in 1..c {
                let mut spec = tilted(minor, k, c, slant);
                spec.attach_start = major_line(b);
                spec.attach_end = major_line(b + 1);
                lines.push(spec);
            }
            let minor_line = |k: usize| (k > 0 && k < c).then(|| first_minor + k - 1);
            for k in 0..c {
                let lo_major = Bound::outer_or(major_line(b), major.start_side_of_band());
                let hi_major = Bound::outer_or(major_line(b + 1), major.end_side_of_band());
                let lo_minor = Bound::outer_or(minor_line(k), minor.start_side_of_band());
                let hi_minor = Bound::outer_or(minor_line(k + 1), minor.end_side_of_band());
                areas.push(match major {
                    Direction::Horizontal => AreaSpec {
                        left: lo_minor,
                        top: lo_major,
                        right: hi_minor,
                        bottom: hi_major,
                    },
                    Direction::Vertical => AreaSpec {
                        left: lo_major,
                        top: lo_minor,
                        right: hi_major,
                        bottom: hi_minor,
                    },
                });
            }
        }
        Self { lines, areas }
    }

    /// Check references and families, and return interior line indices in
    /// attachment-dependency order (Kahn). Attachments resolve before use.
    pub fn validate(&self) -> Result<Vec<usize>, LayoutError> {
        let n = self.lines.len();
        let mut indegree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (k, spec) in self.lines.iter().enumerate() {
            if !spec.start_ratio.is_finite() || !spec.end_ratio.is_finite() {
                return Err(LayoutError::NonFiniteRatio { line: k });
            }
            for target in [spec.attach_start, spec.attach_end].into_iter().flatten() {
                if target >= n {
                    return Err(LayoutError::UnknownLine { line: k, target });
                }
                if target == k {
                    return Err(LayoutError::SelfAttachment { line: k });
                }
                if self.lines[target].direction == spec.direction {
                    return Err(LayoutError::SameFamily { line: k, target });
                }
                indegree[k] += 1;
                dependents[target].push(k);
            }
        }

        for (a, spec) in self.areas.iter().enumerate() {
            let checks = [
                ("left", spec.left, Direction::Vertical),
                ("top", spec.top, Direction::Horizontal),
                ("right", spec.right, Direction::Vertical),
                ("bottom", spec.bottom, Direction::Horizontal),
            ];
            for (edge, bound, family) in checks {
                let direction = match bound {
                    Bound::Outer(side) => side.direction(),
                    Bound::Line(target) => {
                        let Some(line) = self.lines.get(target) else {
                            return Err(LayoutError::UnknownBound { area: a, target });
                        };
                        line.direction
                    }
                };
                if direction != family {
                    return Err(LayoutError::WrongBoundFamily { area: a, edge });
                }
            }
        }

        let mut ready: std::collections::VecDeque<usize> =
            (0..n).filter(|&k| indegree[k] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(k) = ready.pop_front() {
            order.push(k);
            for &d in &dependents[k] {
                indegree[d] -= 1;
                if indegree[d] == 0 {
                    ready.push_back(d);
                }
            }
        }
        if order.len() < n {
            let line = (0..n).find(|&k| indegree[k] > 0).unwrap_or(0);
            return Err(LayoutError::Cycle { line });
        }
        Ok(order)
    }
}

impl Direction {
    /// Outer side bounding the first band of this family.
    fn start_side_of_band(self) -> Side {
        match self {
            Direction::Horizontal => Side::Top,
            Direction::Vertical => Side::Left,
        }
    }
    fn end_side_of_band(self) -> Side {
        match self {
            Direction::Horizontal => Side::Bottom,
            Direction::Vertical => Side::Right,
        }
    }
}

/// Line `k` of `n` evenly spaced lines, tilted by `±slant/(2n)` with
/// alternating sign so neighbors stay apart.
fn tilted(direction: Direction, k: usize, n: usize, slant: f64) -> LineSpec {
    let base = k as f64 / n as f64;
    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
    let d = sign * slant * 0.5 / n as f64;
    LineSpec {
        direction,
        start_ratio: base + d,
        end_ratio: base - d,
        attach_start: None,
        attach_end: None,
    }
}
