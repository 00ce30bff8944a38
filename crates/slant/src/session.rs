//! Puzzle session: the single owner of mesh, pieces, and gesture state.
//!
//! Input arrives as normalized pointer events; every `handle` call is one
//! non-preemptible unit of work. A line move runs line mutation → mesh
//! propagation → area derivation → piece refit before returning, so a frame
//! never sees a half-updated mesh.

use tracing::{debug, warn};

use crate::error::PuzzleError;
use crate::geom2::{distance, midpoint, Aff2, Point, Rect, Segment, SlantCfg, Size2};
use crate::mesh::{Area, Direction, LayoutTemplate, LineId, Mesh};
use crate::piece::Piece;

/// Pointer phase as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// First pointer touches.
    Down,
    /// An additional pointer touches.
    PointerDown,
    Move,
    Up,
}

/// Normalized pointer event in view coordinates; `pointers[0]` is the
/// primary pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: Phase,
    pub pointers: Vec<Point>,
}

impl PointerEvent {
    pub fn new(phase: Phase, pointers: impl Into<Vec<Point>>) -> Self {
        Self {
            phase,
            pointers: pointers.into(),
        }
    }
    pub fn single(phase: Phase, x: f64, y: f64) -> Self {
        Self::new(phase, vec![Point::new(x, y)])
    }
}

/// What the current gesture manipulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionMode {
    #[default]
    None,
    /// Translate one piece.
    Drag,
    /// Pinch-scale one piece.
    Zoom,
    /// Move one mesh line.
    Move,
}

/// Render data for one occupied cell.
#[derive(Debug)]
pub struct PieceFrame<'a, I> {
    pub area: Area,
    pub transform: Aff2,
    pub image: &'a I,
}

/// Everything the host needs to draw one frame.
#[derive(Debug)]
pub struct Frame<'a, I> {
    pub outer: Vec<Segment>,
    pub lines: Vec<Segment>,
    pub pieces: Vec<PieceFrame<'a, I>>,
}

/// Mesh + pieces + gesture state for one collage.
#[derive(Debug)]
pub struct PuzzleSession<I> {
    mesh: Mesh,
    pieces: Vec<Piece<I>>,
    mode: ActionMode,
    handling_line: Option<LineId>,
    handling_piece: Option<usize>,
    changing_pieces: Vec<usize>,
    down: Point,
    previous_distance: f64,
    pinch_mid: Point,
}

impl<I> PuzzleSession<I> {
    /// Session without a layout. `outer` may still be empty (e.g. before the
    /// first resize); a layout needs a positive boundary.
    pub fn new(outer: Rect, cfg: SlantCfg) -> Self {
        Self {
            mesh: Mesh::empty(outer, cfg),
            pieces: Vec::new(),
            mode: ActionMode::None,
            handling_line: None,
            handling_piece: None,
            changing_pieces: Vec::new(),
            down: Point::zeros(),
            previous_distance: 0.0,
            pinch_mid: Point::zeros(),
        }
    }

    /// Install a layout. Pieces beyond the new area count are dropped; the
    /// rest are refit into their cells.
    pub fn set_layout(&mut self, template: &LayoutTemplate) -> Result<(), PuzzleError> {
        self.mesh.load(template)?;
        self.end_gesture();
        let capacity = self.mesh.area_count();
        if self.pieces.len() > capacity {
            warn!(
                dropped = self.pieces.len() - capacity,
                capacity, "layout smaller than piece count"
            );
            self.pieces.truncate(capacity);
        }
        self.refit_all();
        Ok(())
    }

    /// New outer boundary (e.g. on resize): re-layout and refit everything.
    pub fn set_outer_boundary(&mut self, outer: Rect) -> Result<(), PuzzleError> {
        self.mesh.set_outer_boundary(outer)?;
        if !self.mesh.is_empty() {
            self.mesh.layout();
            self.end_gesture();
            self.refit_all();
        }
        Ok(())
    }

    /// Add a piece to the next free area (area-index order).
    ///
    /// Rejected without side effects when no layout is set or every area is
    /// occupied.
    pub fn add_piece(&mut self, image: I, size: Size2) -> Result<usize, PuzzleError> {
        if self.mesh.is_empty() {
            return Err(PuzzleError::NoLayout);
        }
        let position = self.pieces.len();
        let capacity = self.mesh.area_count();
        let Some(area) = self.mesh.area(position) else {
            warn!(capacity, "cannot add more pieces");
            return Err(PuzzleError::Full { capacity });
        };
        self.pieces
            .push(Piece::new(image, size, &area, self.mesh.cfg()));
        Ok(position)
    }

    /// Add pieces in order. Images past the area count are logged and
    /// skipped; returns how many were added. Fails only without a layout.
    pub fn add_pieces(
        &mut self,
        images: impl IntoIterator<Item = (I, Size2)>,
    ) -> Result<usize, PuzzleError> {
        let mut added = 0;
        for (image, size) in images {
            match self.add_piece(image, size) {
                Ok(_) => added += 1,
                Err(PuzzleError::Full { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Drop layout, pieces, and gesture state.
    pub fn reset(&mut self) {
        self.end_gesture();
        self.mesh.reset();
        self.pieces.clear();
    }

    /// Apply one pointer event. Returns true when a redraw is needed.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        let Some(&primary) = event.pointers.first() else {
            return false;
        };
        match event.phase {
            Phase::Down => {
                self.down = primary;
                self.decide_single();
                self.prepare_action();
                false
            }
            Phase::PointerDown => {
                if let Some(&second) = event.pointers.get(1) {
                    self.previous_distance = distance(primary, second);
                    self.pinch_mid = midpoint(primary, second);
                    self.decide_pinch(second);
                }
                false
            }
            Phase::Move => self.perform(event),
            Phase::Up => {
                self.end_gesture();
                false
            }
        }
    }

    fn decide_single(&mut self) {
        self.mode = ActionMode::None;
        self.handling_piece = None;
        self.handling_line = self
            .mesh
            .line_near(self.down, self.mesh.cfg().line_hit_tolerance);
        if self.handling_line.is_some() {
            self.mode = ActionMode::Move;
        } else {
            self.handling_piece = self.piece_at(self.down);
            if self.handling_piece.is_some() {
                self.mode = ActionMode::Drag;
            }
        }
        debug!(mode = ?self.mode, x = self.down.x, y = self.down.y, "gesture start");
    }

    fn decide_pinch(&mut self, second: Point) {
        let Some(i) = self.handling_piece else {
            return;
        };
        if self.mode == ActionMode::Drag && self.pieces[i].contains_point(second) {
            self.mode = ActionMode::Zoom;
            self.pieces[i].prepare();
            debug!(piece = i, "zoom start");
        }
    }

    fn prepare_action(&mut self) {
        match self.mode {
            ActionMode::None | ActionMode::Zoom => {}
            ActionMode::Drag => {
                if let Some(i) = self.handling_piece {
                    self.pieces[i].prepare();
                }
            }
            ActionMode::Move => {
                let Some(line) = self.handling_line else {
                    return;
                };
                self.mesh.prepare_move(line);
                self.changing_pieces = self.pieces_touching(line);
                for &i in &self.changing_pieces {
                    self.pieces[i].prepare();
                }
            }
        }
    }

    fn perform(&mut self, event: &PointerEvent) -> bool {
        let p = event.pointers[0];
        match self.mode {
            ActionMode::None => false,
            ActionMode::Drag => {
                let Some(i) = self.handling_piece else {
                    return false;
                };
                self.pieces[i].translate(p.x - self.down.x, p.y - self.down.y);
                true
            }
            ActionMode::Zoom => {
                let (Some(i), Some(&second)) = (self.handling_piece, event.pointers.get(1))
                else {
                    return false;
                };
                if !(self.previous_distance > 0.0) {
                    return false;
                }
                let scale = distance(p, second) / self.previous_distance;
                self.pieces[i].zoom(scale, scale, self.pinch_mid);
                true
            }
            ActionMode::Move => {
                let Some(id) = self.handling_line else {
                    return false;
                };
                let Some(line) = self.mesh.line(id) else {
                    return false;
                };
                let offset = match line.direction {
                    Direction::Horizontal => p.y - self.down.y,
                    Direction::Vertical => p.x - self.down.x,
                };
                self.mesh.move_line(id, offset);
                let changing = std::mem::take(&mut self.changing_pieces);
                self.refit(&changing);
                self.changing_pieces = changing;
                true
            }
        }
    }

    fn end_gesture(&mut self) {
        self.mode = ActionMode::None;
        self.handling_line = None;
        self.handling_piece = None;
        self.changing_pieces.clear();
        self.mesh.finish_move();
    }

    /// Topmost piece under `p`: its cell contains `p` and its image covers it.
    fn piece_at(&self, p: Point) -> Option<usize> {
        self.pieces.iter().position(|piece| {
            self.mesh
                .area(piece.area)
                .is_some_and(|a| a.contains_point(p))
                && piece.contains_point(p)
        })
    }

    fn pieces_touching(&self, line: LineId) -> Vec<usize> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| {
                self.mesh
                    .area(piece.area)
                    .is_some_and(|a| a.touches(line))
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn refit(&mut self, indices: &[usize]) {
        let cfg = *self.mesh.cfg();
        for &i in indices {
            let piece = &mut self.pieces[i];
            if let Some(area) = self.mesh.area(piece.area) {
                piece.refit(&area, &cfg);
            }
        }
    }

    fn refit_all(&mut self) {
        let all: Vec<usize> = (0..self.pieces.len()).collect();
        self.refit(&all);
    }

    /// Render data: outer boundary, interior lines, occupied cells.
    pub fn frame(&self) -> Frame<'_, I> {
        let pieces = self
            .pieces
            .iter()
            .take(self.mesh.area_count())
            .filter_map(|piece| {
                let area = self.mesh.area(piece.area)?;
                Some(PieceFrame {
                    area,
                    transform: piece.transform(),
                    image: &piece.image,
                })
            })
            .collect();
        Frame {
            outer: self.mesh.outer_lines().iter().map(|l| l.segment()).collect(),
            lines: self.mesh.lines().iter().map(|l| l.segment()).collect(),
            pieces,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece<I>] {
        &self.pieces
    }

    #[inline]
    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    #[inline]
    pub fn handling_line(&self) -> Option<LineId> {
        self.handling_line
    }

    #[inline]
    pub fn handling_piece(&self) -> Option<usize> {
        self.handling_piece
    }
}
