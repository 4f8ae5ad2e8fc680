#![allow(clippy::float_cmp)]

use canvas::config::CanvasConfig;
use canvas::geometry::RectDimension;
use canvas::shape::{Geometry, ShapeType};
use canvas::surface::SvgSurface;

use super::*;

fn canvas() -> Canvas<SvgSurface> {
    let mut c = Canvas::with_default_tools(CanvasConfig::with_id("d"), SvgSurface::new());
    c.render().unwrap();
    c
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_every_step_kind() {
    let steps = parse(
        r#"[
            { "op": "tool", "name": "rect" },
            { "op": "down", "x": 1, "y": 2 },
            { "op": "down", "x": 1, "y": 2, "touch": true, "t": 40 },
            { "op": "move", "x": 3, "y": 4 },
            { "op": "up", "x": 3, "y": 4 },
            { "op": "double_click", "x": 3, "y": 4 },
            { "op": "leave" },
            { "op": "name", "name": "box" },
            { "op": "cancel" },
            { "op": "remove", "id": "box" },
            { "op": "translate", "id": "box", "dx": 5, "dy": -5 },
            { "op": "connect", "id": "l", "from": { "by_id": "a" }, "to": { "at_point": { "x": 9, "y": 9 } } },
            { "op": "control", "id": "c", "x": 1, "y": 1 }
        ]"#,
    )
    .unwrap();
    assert_eq!(steps.len(), 13);
    assert_eq!(steps[1], Step::Down { x: 1.0, y: 2.0, touch: false, t: 0.0 });
    assert_eq!(steps[2], Step::Down { x: 1.0, y: 2.0, touch: true, t: 40.0 });
    assert_eq!(steps[6], Step::Leave);
    assert_eq!(
        steps[11],
        Step::Connect {
            id: "l".into(),
            from: EndpointRef::ById("a".into()),
            to: EndpointRef::AtPoint(Point::new(9.0, 9.0)),
        }
    );
}

#[test]
fn parse_rejects_unknown_op() {
    assert!(parse(r#"[{ "op": "explode" }]"#).is_err());
}

// =============================================================
// Replay
// =============================================================

#[test]
fn replay_draws_and_names_a_rectangle() {
    let mut c = canvas();
    let steps = parse(
        r#"[
            { "op": "tool", "name": "rect" },
            { "op": "down", "x": 10, "y": 10 },
            { "op": "move", "x": 5, "y": 5 },
            { "op": "up", "x": 5, "y": 5 },
            { "op": "name", "name": "box" }
        ]"#,
    )
    .unwrap();
    let report = replay(&mut c, &steps);
    assert_eq!(report, Report { applied: 5, failed: 0 });
    assert_eq!(c.get_node("box").unwrap().geometry, Geometry::Rectangle(RectDimension::new(10.0, 10.0, 30.0, 30.0)));
    assert!(c.surface().to_svg("100", "100").contains("<rect id=\"box\""));
}

#[test]
fn replay_connects_named_shapes() {
    let mut c = canvas();
    let steps = parse(
        r#"[
            { "op": "tool", "name": "circle" },
            { "op": "down", "x": 100, "y": 100 },
            { "op": "up", "x": 150, "y": 100 },
            { "op": "name", "name": "a" },
            { "op": "down", "x": 300, "y": 100 },
            { "op": "up", "x": 350, "y": 100 },
            { "op": "name", "name": "b" },
            { "op": "connect", "id": "ab", "from": { "by_id": "a" }, "to": { "by_id": "b" } }
        ]"#,
    )
    .unwrap();
    assert_eq!(replay(&mut c, &steps).failed, 0);
    assert_eq!(c.nodes().len(), 2);
    assert_eq!(c.edges()[0].shape_type(), ShapeType::Line);
    assert_eq!(c.get_node("a").unwrap().port("a_top").unwrap().connector.as_deref(), Some("ab"));
}

#[test]
fn replay_continues_after_failures() {
    let mut c = canvas();
    let steps = parse(
        r#"[
            { "op": "tool", "name": "hexagon" },
            { "op": "name", "name": "nothing-pending" },
            { "op": "remove", "id": "missing" },
            { "op": "tool", "name": "polyline" },
            { "op": "down", "x": 0, "y": 0 },
            { "op": "up", "x": 0, "y": 0 },
            { "op": "double_click", "x": 0, "y": 0 },
            { "op": "down", "x": 40, "y": 0 },
            { "op": "up", "x": 40, "y": 0 },
            { "op": "double_click", "x": 40, "y": 0 },
            { "op": "name", "name": "wire" }
        ]"#,
    )
    .unwrap();
    let report = replay(&mut c, &steps);
    assert_eq!(report, Report { applied: 7, failed: 4 });
    assert!(c.get_edge("wire").is_some());
}

#[test]
fn apply_reports_unknown_tool() {
    let mut c = canvas();
    let err = apply(&mut c, &Step::Tool { name: "spray".into() }).unwrap_err();
    assert!(matches!(err, ScriptError::UnknownTool(name) if name == "spray"));
}

#[test]
fn cancel_discards_the_draft() {
    let mut c = canvas();
    for step in [
        Step::Tool { name: "ellipse".into() },
        Step::Down { x: 0.0, y: 0.0, touch: false, t: 0.0 },
        Step::Up { x: 60.0, y: 60.0, touch: false, t: 0.0 },
        Step::Cancel,
    ] {
        apply(&mut c, &step).unwrap();
    }
    assert!(c.nodes().is_empty());
}

#[test]
fn control_step_moves_curve_point() {
    let mut c = canvas();
    let steps = parse(
        r#"[
            { "op": "tool", "name": "bezire_curve" },
            { "op": "down", "x": 0, "y": 0 }, { "op": "up", "x": 0, "y": 0 },
            { "op": "down", "x": 60, "y": 60 }, { "op": "up", "x": 60, "y": 60 },
            { "op": "down", "x": 120, "y": 0 }, { "op": "up", "x": 120, "y": 0 },
            { "op": "name", "name": "curve" },
            { "op": "control", "id": "curve", "x": 60, "y": -20 }
        ]"#,
    )
    .unwrap();
    assert_eq!(replay(&mut c, &steps).failed, 0);
    let Geometry::BezierCurve(curve) = &c.get_edge("curve").unwrap().geometry else {
        panic!("expected a curve");
    };
    assert_eq!(curve.points[1], Point::new(60.0, -20.0));
}
