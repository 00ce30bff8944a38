//! Slant line mesh: lines, attachment propagation, areas, and templates.
//!
//! Purpose
//! - Keep a set of movable horizontal/vertical-family lines consistent while
//!   one of them is dragged: every endpoint is the intersection with the line
//!   it is attached to, recomputed in dependency order.
//! - Derive the quadrilateral cells (areas) from the current line positions.
//!
//! Layout
//! - `types.rs` (ids, direction, line data), `line.rs` (per-line ops),
//!   `template.rs` (layout templates + validation), `build.rs` (the `Mesh`),
//!   `area.rs` (cells), `rand.rs` (reproducible random templates).
//!
//! Lines live in one arena and refer to each other by `LineId`, so the
//! attachment graph has no ownership cycles and its update order is computed
//! once when the mesh is built.

mod area;
mod build;
mod line;
pub mod rand;
mod template;
mod types;

pub use area::Area;
pub use build::Mesh;
pub use template::{AreaSpec, Bound, LayoutTemplate, LineSpec};
pub use types::{AreaBounds, Direction, Line, LineId, Side, OUTER_LINES};

#[cfg(test)]
mod tests;
