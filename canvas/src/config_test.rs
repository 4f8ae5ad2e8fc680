#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_interactive_layer_settings() {
    let config = CanvasConfig::default();
    assert_eq!(config.id, "canvas");
    assert_eq!(config.container_id, None);
    assert_eq!(config.grid, [10.0, 10.0]);
    assert!(!config.drag.proportions);
    assert!(config.drag.rotation_point);
    assert_eq!(config.drag.snap, Snap { x: 20.0, y: 20.0, angle: 25.0 });
    assert_eq!(config.drag.cursor_move, "move");
    assert_eq!(config.drag.cursor_rotate, "crosshair");
    assert_eq!(config.drag.cursor_resize, "pointer");
}

#[test]
fn with_id_keeps_other_defaults() {
    let config = CanvasConfig::with_id("board");
    assert_eq!(config.id, "board");
    assert_eq!(config.width, "100%");
    assert_eq!(config.drag, DragOptions::default());
}

#[test]
fn surface_id_is_prefixed() {
    assert_eq!(CanvasConfig::with_id("board").surface_id(), "board_svg");
}

#[test]
fn from_json_fills_missing_fields() {
    let config = CanvasConfig::from_json(r#"{ "id": "d1", "drag": { "snap": { "x": 5 } } }"#).unwrap();
    assert_eq!(config.id, "d1");
    assert_eq!(config.height, "100%");
    assert_eq!(config.drag.snap.x, 5.0);
    assert_eq!(config.drag.snap.y, 20.0);
    assert!(config.drag.rotation_point);
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(CanvasConfig::from_json("{}").unwrap(), CanvasConfig::default());
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(CanvasConfig::from_json("{ id: ").is_err());
    assert!(CanvasConfig::from_json(r#"{ "grid": "wide" }"#).is_err());
}
