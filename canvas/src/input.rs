//! Input model: tools, pointer events, and the gesture state machine.
//!
//! `Tool` captures what a pointer gesture will produce. `MouseState` is the
//! coarse pointer state shown in the readout. `InputState` is the gesture
//! being tracked between pointer-down and commit, carrying everything
//! needed to redraw the provisional shape and build the final one.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::shape::{Geometry, ShapeType};

/// Coarse pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseState {
    /// Pointer released.
    #[default]
    Up,
    /// Pointer pressed, not yet moved.
    Down,
    /// Pointer pressed and moving.
    Drag,
    /// Pointer moving while released.
    Move,
    /// Pointer left the surface.
    Leave,
}

impl MouseState {
    /// Display name shown in the state readout.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Drag => "DRAG",
            Self::Move => "MOVE",
            Self::Leave => "LEAVE",
        }
    }

    /// Whether the pointer is currently pressed.
    #[must_use]
    pub fn is_pressed(self) -> bool {
        matches!(self, Self::Down | Self::Drag)
    }
}

/// Palette commands that do not draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    #[default]
    Select,
    Copy,
    Cut,
    Paste,
    Delete,
    Edit,
    Properties,
    Lasso,
}

impl ToolType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Copy => "COPY",
            Self::Cut => "CUT",
            Self::Paste => "PASTE",
            Self::Delete => "DELETE",
            Self::Edit => "EDIT",
            Self::Properties => "PROPERTIES",
            Self::Lasso => "LASSO",
        }
    }
}

/// A palette entry: either a command or a shape to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Command(ToolType),
    Draw(ShapeType),
}

impl Default for Tool {
    fn default() -> Self {
        Self::Command(ToolType::Select)
    }
}

impl Tool {
    /// Name used in palette element ids (`{canvas}_{NAME}_tool`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Command(t) => t.name(),
            Self::Draw(s) => s.tool_name(),
        }
    }

    /// Shape this tool draws, if any.
    #[must_use]
    pub fn shape_type(self) -> Option<ShapeType> {
        match self {
            Self::Command(_) => None,
            Self::Draw(s) => Some(s),
        }
    }

    /// Whether pointer gestures with this tool create shapes.
    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.gesture().is_some()
    }

    /// How this tool turns pointer input into a shape.
    #[must_use]
    pub fn gesture(self) -> Option<Gesture> {
        self.shape_type().and_then(ShapeType::gesture)
    }

    /// Look a tool up by its palette name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        let commands = [
            ToolType::Select,
            ToolType::Copy,
            ToolType::Cut,
            ToolType::Paste,
            ToolType::Delete,
            ToolType::Edit,
            ToolType::Properties,
            ToolType::Lasso,
        ];
        if let Some(t) = commands.into_iter().find(|t| t.name() == upper) {
            return Some(Self::Command(t));
        }
        ShapeType::DRAWABLE
            .into_iter()
            .find(|s| s.tool_name() == upper)
            .map(Self::Draw)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pointer sequence that creates a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Press, drag, release: line, rectangle, circle, ellipse.
    SingleShot,
    /// One press per point, finalized by a double-activation: polygon, polyline.
    MultiClick,
    /// Exactly three presses, finalized on the third release: bezier curve.
    ThreeClick,
}

/// Source of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// A raw pointer event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position on the surface.
    pub pos: Point,
    pub kind: PointerKind,
    /// Host timestamp in milliseconds.
    pub time_ms: f64,
}

impl PointerEvent {
    /// A mouse event at `(x, y)` with a zero timestamp.
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { pos: Point::new(x, y), kind: PointerKind::Mouse, time_ms: 0.0 }
    }

    /// A touch event at `(x, y)` at `time_ms`.
    #[must_use]
    pub fn touch(x: f64, y: f64, time_ms: f64) -> Self {
        Self { pos: Point::new(x, y), kind: PointerKind::Touch, time_ms }
    }
}

/// A shape that has been drawn but not named yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub geometry: Geometry,
}

impl Draft {
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.geometry.shape_type()
    }
}

/// Persistent UI state visible to the readouts.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently selected tool.
    pub tool: Tool,
    pub mouse: MouseState,
    /// Last pointer position seen.
    pub cursor: Point,
    /// Timestamp of the previous touch tap, for double-tap detection.
    pub last_tap_ms: Option<f64>,
}

/// Gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A single-shot shape is being sized by dragging.
    Sizing {
        shape_type: ShapeType,
        /// Where the pointer went down.
        start: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// Points of a polygon, polyline, or bezier curve are being collected.
    Collecting {
        shape_type: ShapeType,
        points: Vec<Point>,
    },
    /// The shape is complete and waiting for the host to name it. The
    /// provisional shape stays on the surface until then.
    PendingCommit { draft: Draft },
}

impl InputState {
    /// Points collected so far by a multi-click gesture.
    #[must_use]
    pub fn collected(&self) -> &[Point] {
        match self {
            Self::Collecting { points, .. } => points,
            _ => &[],
        }
    }
}
