//! Shared numeric and style constants for the canvas crate.

// ── Shape creation ──────────────────────────────────────────────

/// Smallest extent, per axis, of a shape created by dragging. Shorter drags
/// are extended to this size from the start point.
pub const MIN_SHAPE_SIZE: f64 = 30.0;

/// Size of the provisional shape drawn on pointer-down, before any drag.
pub const GHOST_INITIAL_SIZE: f64 = 5.0;

/// Suffix of the provisional shape's element id, after the canvas id. Only
/// one provisional shape exists per canvas at a time.
pub const GHOST_SUFFIX: &str = "temp_id";

/// Dashed outline used for provisional shapes.
pub const GHOST_STYLE: &str = "stroke: green; stroke-width: 2px; stroke-dasharray: 2; fill: none;";

/// Control points a bezier curve is built from.
pub const BEZIER_POINT_COUNT: usize = 3;

/// Points a polygon or polyline needs before it can be finalized.
pub const MIN_POLY_POINTS: usize = 2;

/// Two touch taps closer than this (milliseconds) count as a double-activation.
pub const DOUBLE_TAP_MS: f64 = 300.0;

// ── Shape rendering ─────────────────────────────────────────────

/// Default stroke color for committed shapes.
pub const DEFAULT_STROKE_COLOR: &str = "black";

/// Default stroke width for committed shapes, in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Stroke width of a bezier curve path, in pixels.
pub const CURVE_STROKE_WIDTH: f64 = 2.0;

/// Radius of the draggable bezier control handle.
pub const CONTROL_POINT_RADIUS: f64 = 5.0;

/// Fill and stroke of the draggable bezier control handle.
pub const CONTROL_POINT_STYLE: &str = "stroke: #DAA520; fill: #DAA520; stroke-width: 2px;";

/// Suffix of the arrowhead marker definition referenced by lines, after the canvas id.
pub const ARROW_MARKER_SUFFIX: &str = "arrow";

/// Class the interactive (drag/resize) layer looks for.
pub const INTERACTIVE_CLASS: &str = "drag-svg";

// ── Ports ───────────────────────────────────────────────────────

/// Side length of a port box.
pub const PORT_SIZE: f64 = 10.0;

/// Port fill when nothing is connected.
pub const PORT_FILL_EMPTY: &str = "lightblue";

/// Port fill when an edge is connected.
pub const PORT_FILL_CONNECTED: &str = "green";
