//! Error types for canvas operations and drawing-surface calls.
//!
//! Every error is local to one operation. The canvas stays interactive after
//! any of them; the caller decides whether to surface, retry, or ignore.

use crate::input::Tool;
use crate::shape::{ShapeId, ShapeType};

/// Failure reported by a [`crate::surface::Surface`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// No element with this id exists on the surface.
    #[error("no element with id `{0}`")]
    MissingElement(String),
    /// An element with this id is already on the surface.
    #[error("element `{0}` already exists")]
    DuplicateElement(String),
    /// The browser DOM rejected a call.
    #[error("dom call failed: {0}")]
    Dom(String),
}

/// Failure of a canvas operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    /// A shape with this id is already owned by the canvas.
    #[error("duplicate shape id `{0}`")]
    DuplicateId(ShapeId),
    /// A multi-click shape was finalized with too few points.
    #[error("{shape_type} needs {required} points, got {points}")]
    IncompleteShape { shape_type: ShapeType, points: usize, required: usize },
    /// A line endpoint names a node the canvas does not own.
    #[error("line endpoint references unknown node `{0}`")]
    UnresolvedEndpoint(ShapeId),
    /// A line endpoint names a node whose ports are all connected.
    #[error("node `{0}` has no free port")]
    NoFreePort(ShapeId),
    /// No node, edge, or tool matches.
    #[error("`{0}` not found")]
    NotFound(String),
    /// The tool cannot create shapes of this type.
    #[error("tool {0:?} cannot draw")]
    NotDrawable(Tool),
    /// A name was supplied while no shape was waiting for one.
    #[error("no shape is waiting for a name")]
    NothingPending,
    /// The drawing surface rejected a call.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
