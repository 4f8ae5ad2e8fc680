#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::SvgSurface;

fn square() -> RectDimension {
    RectDimension::new(100.0, 100.0, 80.0, 120.0)
}

#[test]
fn layout_orders_top_bottom_left_right() {
    let ports = layout("n1", &square());
    let ids: Vec<&str> = ports.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["n1_top", "n1_bottom", "n1_left", "n1_right"]);
    assert!(ports.iter().all(Port::is_empty));
}

#[test]
fn layout_centres_boxes_on_edge_midpoints() {
    let ports = layout("n1", &square());
    let centres: Vec<Point> = ports.iter().map(Port::connection_point).collect();
    assert_eq!(centres[0], Point::new(160.0, 100.0));
    assert_eq!(centres[1], Point::new(160.0, 180.0));
    assert_eq!(centres[2], Point::new(100.0, 140.0));
    assert_eq!(centres[3], Point::new(220.0, 140.0));
}

#[test]
fn box_origin_is_offset_by_half_size() {
    let ports = layout("n1", &square());
    assert_eq!((ports[0].x, ports[0].y), (155.0, 95.0));
}

#[test]
fn relayout_moves_ports_and_keeps_connections() {
    let mut ports = layout("n1", &square());
    ports[2].connect("e1", PortType::Target);
    relayout(&mut ports, &RectDimension::new(0.0, 0.0, 80.0, 120.0));
    assert_eq!(ports[2].connection_point(), Point::new(0.0, 40.0));
    assert_eq!(ports[2].connector.as_deref(), Some("e1"));
}

#[test]
fn connect_and_disconnect() {
    let mut port = layout("n", &square()).remove(0);
    port.connect("edge", PortType::Source);
    assert!(!port.is_empty());
    assert_eq!(port.port_type, Some(PortType::Source));
    port.disconnect();
    assert!(port.is_empty());
    assert_eq!(port.port_type, None);
}

#[test]
fn contains_covers_the_box() {
    let port = layout("n", &square()).remove(0);
    assert!(port.contains(Point::new(155.0, 95.0)));
    assert!(port.contains(Point::new(165.0, 105.0)));
    assert!(!port.contains(Point::new(166.0, 100.0)));
}

#[test]
fn render_fill_tracks_connection() {
    let mut surface = SvgSurface::new();
    let mut port = layout("n", &square()).remove(3);
    port.render(&mut surface).unwrap();
    assert_eq!(surface.attr("n_right", "style"), Some("stroke: black; stroke-width: 1px; fill: lightblue;"));
    assert_eq!(surface.attr("n_right", "data-position"), Some("right"));

    port.connect("e", PortType::Target);
    port.render(&mut surface).unwrap();
    assert_eq!(surface.attr("n_right", "style"), Some("stroke: black; stroke-width: 1px; fill: green;"));
    assert_eq!(surface.len(), 1);
}
