//! 2D geometry primitives used by the line mesh and the piece transforms.
//!
//! Purpose
//! - Cross product, infinite-line intersection, distance, midpoint.
//! - Convex containment and polygon area/centroid helpers.
//! - `Aff2` affine maps and `Rect`/`Size2` value types.
//!
//! Conventions
//! - View space is y-down. Polygons are stored clockwise on screen
//!   (top-left, top-right, bottom-right, bottom-left), so interior points
//!   have a non-negative cross product against every edge.

mod types;
mod util;

pub use types::{
    Aff2, Point, Rect, Segment, SlantCfg, Size2, DEFAULT_LINE_HIT_TOLERANCE, DEFAULT_MIN_CELL_EXTENT,
};
pub use util::{centroid, convex_contains, cross, distance, intersect, midpoint, signed_area};

#[cfg(test)]
mod tests;
