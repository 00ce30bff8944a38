//! Geometric layout engine for slant photo collages.
//!
//! A collage is a mesh of movable horizontal/vertical-family lines over a
//! rectangular boundary. Dragging a line moves every endpoint attached to it,
//! reshapes the quadrilateral cells it bounds, and refits the images placed
//! in those cells.
//!
//! Modules (leaf first)
//! - `geom2`: points, cross product, intersection, affine maps.
//! - `mesh`: lines, attachment propagation, areas, layout templates.
//! - `piece`: image-to-cell cover fit and gesture edits.
//! - `session`: pointer-event controller owning mesh and pieces.
//!
//! Everything is single-threaded and synchronous; the host owns one
//! `PuzzleSession` and feeds it events from its input thread.

pub mod error;
pub mod geom2;
pub mod mesh;
pub mod piece;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{LayoutError, PuzzleError};
pub use geom2::{Aff2, Point, Rect, Segment, SlantCfg, Size2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{LayoutError, PuzzleError};
    pub use crate::geom2::{
        cross, distance, intersect, midpoint, Aff2, Point, Rect, Segment, SlantCfg, Size2,
    };
    pub use crate::mesh::rand::{draw_template, RandomCfg, ReplayToken};
    pub use crate::mesh::{
        Area, AreaSpec, Bound, Direction, LayoutTemplate, Line, LineId, LineSpec, Mesh, Side,
    };
    pub use crate::piece::{base_fit, Piece};
    pub use crate::session::{ActionMode, Frame, Phase, PieceFrame, PointerEvent, PuzzleSession};
}
