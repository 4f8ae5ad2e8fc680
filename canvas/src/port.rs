//! Ports: attachment points on node shapes where edges plug in.

#[cfg(test)]
#[path = "port_test.rs"]
mod port_test;

use serde::{Deserialize, Serialize};

use crate::consts::{PORT_FILL_CONNECTED, PORT_FILL_EMPTY, PORT_SIZE};
use crate::error::SurfaceError;
use crate::geometry::{Point, RectDimension};
use crate::shape::ShapeId;
use crate::surface::Surface;

/// Which side of its node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl PortPosition {
    /// Layout order of ports on a node.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Role of the edge end plugged into a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortType {
    /// The edge starts here.
    Source,
    /// The edge ends here.
    Target,
}

/// An attachment point. `x`/`y` is the top-left of its square box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub position: PortPosition,
    pub x: f64,
    pub y: f64,
    /// Edge plugged into this port, if any.
    pub connector: Option<ShapeId>,
    pub port_type: Option<PortType>,
}

impl Port {
    /// The point an edge end snaps to: the centre of the box.
    #[must_use]
    pub fn connection_point(&self) -> Point {
        Point::new(self.x + PORT_SIZE / 2.0, self.y + PORT_SIZE / 2.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connector.is_none()
    }

    pub fn connect(&mut self, edge: &str, port_type: PortType) {
        self.connector = Some(edge.to_string());
        self.port_type = Some(port_type);
    }

    pub fn disconnect(&mut self) {
        self.connector = None;
        self.port_type = None;
    }

    /// Whether `pt` falls inside the port box.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        RectDimension::new(self.x, self.y, PORT_SIZE, PORT_SIZE).contains(pt)
    }

    /// Draw or update the port box.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        surface.ensure(None, "rect", &self.id)?;
        let fill = if self.is_empty() { PORT_FILL_EMPTY } else { PORT_FILL_CONNECTED };
        surface.set_attrs(
            &self.id,
            &[
                ("x", self.x.to_string()),
                ("y", self.y.to_string()),
                ("height", PORT_SIZE.to_string()),
                ("width", PORT_SIZE.to_string()),
                ("style", format!("stroke: black; stroke-width: 1px; fill: {fill};")),
                ("data-type", "port".to_string()),
                ("data-position", self.position.suffix().to_string()),
            ],
        )
    }
}

/// Lay out the four ports of a node at the mid-points of its bounding box.
#[must_use]
pub fn layout(node_id: &str, bounds: &RectDimension) -> Vec<Port> {
    PortPosition::ALL
        .into_iter()
        .map(|position| {
            let (x, y) = origin(position, bounds);
            Port {
                id: format!("{node_id}_{}", position.suffix()),
                position,
                x,
                y,
                connector: None,
                port_type: None,
            }
        })
        .collect()
}

/// Move existing ports to match new bounds, keeping their connections.
pub fn relayout(ports: &mut [Port], bounds: &RectDimension) {
    for port in ports {
        let (x, y) = origin(port.position, bounds);
        port.x = x;
        port.y = y;
    }
}

fn origin(position: PortPosition, b: &RectDimension) -> (f64, f64) {
    let half = PORT_SIZE / 2.0;
    match position {
        PortPosition::Top => (b.left + b.width / 2.0 - half, b.top - half),
        PortPosition::Bottom => (b.left + b.width / 2.0 - half, b.top + b.height - half),
        PortPosition::Left => (b.left - half, b.top + b.height / 2.0 - half),
        PortPosition::Right => (b.left + b.width - half, b.top + b.height / 2.0 - half),
    }
}
