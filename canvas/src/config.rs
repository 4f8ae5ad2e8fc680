//! Canvas configuration.
//!
//! Loaded by hosts from JSON; every field has a default so partial files
//! work. `DragOptions` is handed unchanged to the interactive layer that
//! provides translate/resize/rotate gestures on registered shapes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

/// Snapping steps for the interactive layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snap {
    pub x: f64,
    pub y: f64,
    /// Rotation step in degrees.
    pub angle: f64,
}

impl Default for Snap {
    fn default() -> Self {
        Self { x: 20.0, y: 20.0, angle: 25.0 }
    }
}

/// Options for the drag/resize/rotate provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    /// Keep aspect ratio while resizing.
    pub proportions: bool,
    /// Show a rotation handle.
    pub rotation_point: bool,
    pub snap: Snap,
    pub cursor_move: String,
    pub cursor_rotate: String,
    pub cursor_resize: String,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            proportions: false,
            rotation_point: true,
            snap: Snap::default(),
            cursor_move: "move".to_string(),
            cursor_rotate: "crosshair".to_string(),
            cursor_resize: "pointer".to_string(),
        }
    }
}

/// Canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas id; prefixes every chrome element id.
    pub id: String,
    /// Host element the canvas attaches to. The document body when absent.
    pub container_id: Option<String>,
    /// CSS width, with unit.
    pub width: String,
    /// CSS height, with unit.
    pub height: String,
    /// Grid cell size in pixels.
    pub grid: [f64; 2],
    pub drag: DragOptions,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            id: "canvas".to_string(),
            container_id: None,
            width: "100%".to_string(),
            height: "100%".to_string(),
            grid: [10.0, 10.0],
            drag: DragOptions::default(),
        }
    }
}

impl CanvasConfig {
    /// Default settings with a specific canvas id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Parse settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Id of the drawing surface element.
    #[must_use]
    pub fn surface_id(&self) -> String {
        format!("{}_svg", self.id)
    }
}
