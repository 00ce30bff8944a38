//! Error types for layout construction and piece management.

use thiserror::Error;

/// A layout template or boundary that cannot produce a well-formed mesh.
///
/// These are construction bugs in the caller's template, not runtime
/// conditions of a drag.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("line {line}: attachment to unknown line {target}")]
    UnknownLine { line: usize, target: usize },

    #[error("line {line} attaches to itself")]
    SelfAttachment { line: usize },

    #[error("line {line}: attachment {target} belongs to the same family")]
    SameFamily { line: usize, target: usize },

    #[error("line {line}: non-finite layout ratio")]
    NonFiniteRatio { line: usize },

    #[error("attachment cycle through line {line}")]
    Cycle { line: usize },

    #[error("area {area}: unknown bounding line {target}")]
    UnknownBound { area: usize, target: usize },

    #[error("area {area}: {edge} bound belongs to the wrong line family")]
    WrongBoundFamily { area: usize, edge: &'static str },

    #[error("degenerate outer boundary {width}x{height}")]
    DegenerateBoundary { width: f64, height: f64 },
}

/// Rejected session operations. Non-fatal: the session state is unchanged.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PuzzleError {
    #[error("layout holds {capacity} pieces; cannot add more")]
    Full { capacity: usize },

    #[error("no layout set")]
    NoLayout,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
