//! Scripted pointer sessions.
//!
//! A script is a JSON array of steps replayed against a [`Canvas`]. Steps
//! mirror what a browser host would forward: tool clicks, pointer events,
//! answers to naming prompts, and interactive moves. A failing step is
//! logged and skipped; the canvas stays usable and replay continues.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::engine::{Action, Canvas};
use canvas::error::CanvasError;
use canvas::geometry::Point;
use canvas::input::{PointerEvent, PointerKind, Tool};
use canvas::shape::{EndpointRef, Shape};
use canvas::surface::Surface;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Select a palette tool by name (`rect`, `polygon`, `select`, ...).
    Tool { name: String },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
        /// Timestamp in milliseconds, for touch double-taps.
        #[serde(default)]
        t: f64,
    },
    Move { x: f64, y: f64 },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
        #[serde(default)]
        t: f64,
    },
    DoubleClick { x: f64, y: f64 },
    Leave,
    /// Answer the pending naming prompt.
    Name { name: String },
    /// Dismiss the pending naming prompt.
    Cancel,
    Remove { id: String },
    Translate { id: String, dx: f64, dy: f64 },
    /// Add a straight connector between two endpoints.
    Connect { id: String, from: EndpointRef, to: EndpointRef },
    /// Drag a curve's control handle to `(x, y)` and release it.
    Control { id: String, x: f64, y: f64 },
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub applied: usize,
    pub failed: usize,
}

/// Parse a script.
///
/// # Errors
///
/// Returns the `serde_json` error for malformed scripts.
pub fn parse(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Replay `steps` in order.
pub fn replay<S: Surface>(canvas: &mut Canvas<S>, steps: &[Step]) -> Report {
    let mut report = Report::default();
    for (index, step) in steps.iter().enumerate() {
        match apply(canvas, step) {
            Ok(actions) => {
                report.applied += 1;
                for action in &actions {
                    log_action(action);
                }
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(step = index, error = %e, "step failed");
            }
        }
    }
    report
}

/// Apply one step.
///
/// # Errors
///
/// [`ScriptError::UnknownTool`] for unknown tool names, otherwise the
/// canvas error of the underlying operation.
pub fn apply<S: Surface>(canvas: &mut Canvas<S>, step: &Step) -> Result<Vec<Action>, ScriptError> {
    let actions = match step {
        Step::Tool { name } => {
            let tool = Tool::from_name(name).ok_or_else(|| ScriptError::UnknownTool(name.clone()))?;
            canvas.set_tool(tool)?
        }
        Step::Down { x, y, touch, t } => canvas.on_pointer_down(event(*x, *y, *touch, *t))?,
        Step::Move { x, y } => canvas.on_pointer_move(PointerEvent::mouse(*x, *y))?,
        Step::Up { x, y, touch, t } => canvas.on_pointer_up(event(*x, *y, *touch, *t))?,
        Step::DoubleClick { x, y } => canvas.on_double_click(PointerEvent::mouse(*x, *y))?,
        Step::Leave => canvas.on_pointer_leave()?,
        Step::Name { name } => canvas.resolve_name(Some(name.as_str()))?,
        Step::Cancel => canvas.resolve_name(None)?,
        Step::Remove { id } => vec![canvas.remove_shape(id)?],
        Step::Translate { id, dx, dy } => {
            canvas.translate_shape(id, *dx, *dy)?;
            Vec::new()
        }
        Step::Connect { id, from, to } => canvas.add_edge(Shape::line(id.as_str(), from.clone(), to.clone()))?,
        Step::Control { id, x, y } => {
            canvas.drag_control_point(id, Point::new(*x, *y))?;
            canvas.end_control_point_drag(id)?;
            Vec::new()
        }
    };
    Ok(actions)
}

fn event(x: f64, y: f64, touch: bool, t: f64) -> PointerEvent {
    let kind = if touch { PointerKind::Touch } else { PointerKind::Mouse };
    PointerEvent { pos: Point::new(x, y), kind, time_ms: t }
}

fn log_action(action: &Action) {
    match action {
        Action::NameRequested { shape_type } => tracing::info!(shape = %shape_type, "name requested"),
        Action::ShapeAdded { id, shape_type } => tracing::info!(%id, shape = %shape_type, "shape added"),
        Action::ShapeRemoved { id } => tracing::info!(%id, "shape removed"),
        Action::DraftDiscarded { shape_type } => tracing::info!(shape = %shape_type, "draft discarded"),
        Action::ToolChanged(tool) => tracing::debug!(%tool, "tool changed"),
        Action::RegisterInteractive { id, .. } => tracing::debug!(%id, "interactive"),
        Action::AttachListeners { surface_id } => tracing::debug!(%surface_id, "listeners attached"),
    }
}
