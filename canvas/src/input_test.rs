#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// MouseState
// =============================================================

#[test]
fn mouse_state_defaults_to_up() {
    assert_eq!(MouseState::default(), MouseState::Up);
}

#[test]
fn mouse_state_pressed_only_while_down_or_dragging() {
    assert!(MouseState::Down.is_pressed());
    assert!(MouseState::Drag.is_pressed());
    assert!(!MouseState::Up.is_pressed());
    assert!(!MouseState::Move.is_pressed());
    assert!(!MouseState::Leave.is_pressed());
}

#[test]
fn mouse_state_names() {
    assert_eq!(MouseState::Drag.name(), "DRAG");
    assert_eq!(MouseState::Leave.name(), "LEAVE");
}

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_defaults_to_select() {
    assert_eq!(Tool::default(), Tool::Command(ToolType::Select));
    assert!(!Tool::default().is_drawable());
    assert_eq!(Tool::default().shape_type(), None);
}

#[test]
fn tool_gestures_follow_shape_type() {
    assert_eq!(Tool::Draw(ShapeType::Rectangle).gesture(), Some(Gesture::SingleShot));
    assert_eq!(Tool::Draw(ShapeType::Line).gesture(), Some(Gesture::SingleShot));
    assert_eq!(Tool::Draw(ShapeType::Polygon).gesture(), Some(Gesture::MultiClick));
    assert_eq!(Tool::Draw(ShapeType::Polyline).gesture(), Some(Gesture::MultiClick));
    assert_eq!(Tool::Draw(ShapeType::BezierCurve).gesture(), Some(Gesture::ThreeClick));
    assert_eq!(Tool::Draw(ShapeType::Path).gesture(), None);
    assert_eq!(Tool::Command(ToolType::Delete).gesture(), None);
}

#[test]
fn custom_and_path_are_not_drawable() {
    assert!(!Tool::Draw(ShapeType::Custom).is_drawable());
    assert!(!Tool::Draw(ShapeType::Path).is_drawable());
    assert!(Tool::Draw(ShapeType::Ellipse).is_drawable());
}

#[test]
fn tool_names_use_palette_spelling() {
    assert_eq!(Tool::Draw(ShapeType::Rectangle).name(), "RECT");
    assert_eq!(Tool::Draw(ShapeType::BezierCurve).name(), "BEZIRE_CURVE");
    assert_eq!(Tool::Command(ToolType::Select).to_string(), "SELECT");
}

#[test]
fn tool_from_name_is_case_insensitive() {
    assert_eq!(Tool::from_name("rect"), Some(Tool::Draw(ShapeType::Rectangle)));
    assert_eq!(Tool::from_name("Polygon"), Some(Tool::Draw(ShapeType::Polygon)));
    assert_eq!(Tool::from_name("select"), Some(Tool::Command(ToolType::Select)));
    assert_eq!(Tool::from_name("bezire_curve"), Some(Tool::Draw(ShapeType::BezierCurve)));
}

#[test]
fn tool_from_name_rejects_unknown_and_undrawable() {
    assert_eq!(Tool::from_name("hexagon"), None);
    assert_eq!(Tool::from_name("path"), None);
    assert_eq!(Tool::from_name("custom"), None);
}

// =============================================================
// Events and gesture state
// =============================================================

#[test]
fn pointer_event_constructors() {
    let m = PointerEvent::mouse(1.0, 2.0);
    assert_eq!(m.kind, PointerKind::Mouse);
    assert_eq!(m.pos, Point::new(1.0, 2.0));
    assert_eq!(m.time_ms, 0.0);
    let t = PointerEvent::touch(3.0, 4.0, 99.0);
    assert_eq!(t.kind, PointerKind::Touch);
    assert_eq!(t.time_ms, 99.0);
}

#[test]
fn input_state_collected_points() {
    assert!(InputState::Idle.collected().is_empty());

    let collecting = InputState::Collecting {
        shape_type: ShapeType::Polygon,
        points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
    };
    assert_eq!(collecting.collected().len(), 2);

    let sizing = InputState::Sizing {
        shape_type: ShapeType::Circle,
        start: Point::default(),
        current: Point::default(),
    };
    assert!(sizing.collected().is_empty());
}

#[test]
fn draft_reports_its_shape_type() {
    let draft = Draft { geometry: Geometry::Polyline(vec![Point::default(), Point::new(5.0, 5.0)]) };
    assert_eq!(draft.shape_type(), ShapeType::Polyline);
}
