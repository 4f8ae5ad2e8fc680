//! Shapes: the renderable nodes and edges of a diagram.
//!
//! A [`Shape`] pairs identity and styling with a [`Geometry`], a closed sum
//! over every drawable kind where each arm holds only the dimension that
//! kind needs. Rendering reads the geometry and writes attributes to a
//! [`Surface`]; it never changes the shape, so rendering twice is a no-op
//! the second time.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ARROW_MARKER_SUFFIX, BEZIER_POINT_COUNT, CONTROL_POINT_RADIUS, CONTROL_POINT_STYLE, CURVE_STROKE_WIDTH,
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH,
};
use crate::curve::basis_path;
use crate::error::{CanvasError, SurfaceError};
use crate::geometry::{
    ArrowType, CircleDimension, EllipseDimension, LineDimension, Point, RectDimension, bounds_of, points_attr,
};
use crate::input::Gesture;
use crate::port::{self, Port};
use crate::surface::Surface;

/// Caller-supplied shape identifier. Also the id of the shape's element on the surface.
pub type ShapeId = String;

/// Kind tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Custom,
    Line,
    Rectangle,
    Circle,
    Ellipse,
    Polyline,
    Polygon,
    Path,
    BezierCurve,
}

impl ShapeType {
    /// Every shape type a tool can draw, in palette order.
    pub const DRAWABLE: [Self; 7] = [
        Self::Line,
        Self::Rectangle,
        Self::Circle,
        Self::Ellipse,
        Self::Polygon,
        Self::Polyline,
        Self::BezierCurve,
    ];

    /// Debug name of the tag.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Custom => "CUSTOM",
            Self::Line => "LINE",
            Self::Rectangle => "RECTANGLE",
            Self::Circle => "CIRCLE",
            Self::Ellipse => "ELLIPSE",
            Self::Polyline => "POLYLINE",
            Self::Polygon => "POLYGON",
            Self::Path => "PATH",
            Self::BezierCurve => "BEZIRE_CURVE",
        }
    }

    /// Name of the palette tool that draws this type.
    #[must_use]
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Rectangle => "RECT",
            other => other.name(),
        }
    }

    /// How pointer input builds this shape. `None` for types no tool draws.
    #[must_use]
    pub fn gesture(self) -> Option<Gesture> {
        match self {
            Self::Line | Self::Rectangle | Self::Circle | Self::Ellipse => Some(Gesture::SingleShot),
            Self::Polygon | Self::Polyline => Some(Gesture::MultiClick),
            Self::BezierCurve => Some(Gesture::ThreeClick),
            Self::Custom | Self::Path => None,
        }
    }

    /// Whether shapes of this type are connectors (edges) rather than nodes.
    #[must_use]
    pub fn is_edge(self) -> bool {
        matches!(self, Self::Line | Self::Polyline | Self::Path | Self::BezierCurve)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a line endpoint attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRef {
    /// The next empty port of the node with this id.
    ById(ShapeId),
    /// A literal coordinate.
    AtPoint(Point),
}

/// A port a line endpoint is bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRef {
    pub node: ShapeId,
    pub port: String,
}

/// Geometry of a straight connector.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub dim: LineDimension,
    pub from: EndpointRef,
    pub to: EndpointRef,
    /// Port the start is plugged into, once resolved.
    pub start_port: Option<PortRef>,
    /// Port the end is plugged into, once resolved.
    pub end_port: Option<PortRef>,
}

/// Geometry of a bezier curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveGeometry {
    /// Control points; at least three.
    pub points: Vec<Point>,
    /// Position of the control handle while it is being dragged.
    pub handle: Option<Point>,
}

impl CurveGeometry {
    /// The interior point exposed as a draggable handle.
    #[must_use]
    pub fn control_point(&self) -> Point {
        self.points.get(1).copied().unwrap_or_default()
    }
}

/// Per-kind geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Line(LineGeometry),
    Rectangle(RectDimension),
    Circle(CircleDimension),
    Ellipse(EllipseDimension),
    Polygon(Vec<Point>),
    Polyline(Vec<Point>),
    BezierCurve(CurveGeometry),
}

impl Geometry {
    /// A line between two endpoints. Literal endpoints are copied into the
    /// dimension immediately; node references are filled in on resolution.
    #[must_use]
    pub fn line(from: EndpointRef, to: EndpointRef) -> Self {
        let mut dim = LineDimension::default();
        if let EndpointRef::AtPoint(p) = from {
            dim.start = p;
        }
        if let EndpointRef::AtPoint(p) = to {
            dim.end = p;
        }
        Self::Line(LineGeometry { dim, from, to, start_port: None, end_port: None })
    }

    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Line(_) => ShapeType::Line,
            Self::Rectangle(_) => ShapeType::Rectangle,
            Self::Circle(_) => ShapeType::Circle,
            Self::Ellipse(_) => ShapeType::Ellipse,
            Self::Polygon(_) => ShapeType::Polygon,
            Self::Polyline(_) => ShapeType::Polyline,
            Self::BezierCurve(_) => ShapeType::BezierCurve,
        }
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> RectDimension {
        match self {
            Self::Line(l) => bounds_of(&[l.dim.start, l.dim.end]).unwrap_or_default(),
            Self::Rectangle(r) => *r,
            Self::Circle(c) => c.bounds(),
            Self::Ellipse(e) => e.bounds(),
            Self::Polygon(pts) | Self::Polyline(pts) => bounds_of(pts).unwrap_or_default(),
            Self::BezierCurve(c) => bounds_of(&c.points).unwrap_or_default(),
        }
    }

    /// Shift the geometry by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let delta = Point::new(dx, dy);
        match self {
            Self::Line(l) => {
                l.dim.start.add(delta);
                l.dim.end.add(delta);
            }
            Self::Rectangle(r) => {
                r.left += dx;
                r.top += dy;
            }
            Self::Circle(c) => {
                c.cx += dx;
                c.cy += dy;
            }
            Self::Ellipse(e) => {
                e.cx += dx;
                e.cy += dy;
            }
            Self::Polygon(pts) | Self::Polyline(pts) => pts.iter_mut().for_each(|p| p.add(delta)),
            Self::BezierCurve(c) => {
                c.points.iter_mut().for_each(|p| p.add(delta));
                if let Some(h) = c.handle.as_mut() {
                    h.add(delta);
                }
            }
        }
    }
}

/// Stroke color and width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self { color: DEFAULT_STROKE_COLOR.to_string(), width: DEFAULT_STROKE_WIDTH }
    }
}

/// A diagram element.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub title: String,
    pub description: String,
    /// Free-form CSS appended to the rendered style.
    pub style: String,
    pub stroke: Stroke,
    pub geometry: Geometry,
    /// Attachment points; empty for edges.
    pub ports: Vec<Port>,
}

impl Shape {
    /// Wrap a geometry. Node geometries get their four ports.
    #[must_use]
    pub fn new(id: impl Into<ShapeId>, geometry: Geometry) -> Self {
        let id = id.into();
        let ports = if geometry.shape_type().is_edge() {
            Vec::new()
        } else {
            port::layout(&id, &geometry.bounds())
        };
        Self {
            id,
            title: String::new(),
            description: String::new(),
            style: String::new(),
            stroke: Stroke::default(),
            geometry,
            ports,
        }
    }

    #[must_use]
    pub fn line(id: impl Into<ShapeId>, from: EndpointRef, to: EndpointRef) -> Self {
        Self::new(id, Geometry::line(from, to))
    }

    #[must_use]
    pub fn rectangle(id: impl Into<ShapeId>, dim: RectDimension) -> Self {
        Self::new(id, Geometry::Rectangle(dim))
    }

    #[must_use]
    pub fn circle(id: impl Into<ShapeId>, dim: CircleDimension) -> Self {
        Self::new(id, Geometry::Circle(dim))
    }

    #[must_use]
    pub fn ellipse(id: impl Into<ShapeId>, dim: EllipseDimension) -> Self {
        Self::new(id, Geometry::Ellipse(dim))
    }

    #[must_use]
    pub fn polygon(id: impl Into<ShapeId>, points: Vec<Point>) -> Self {
        Self::new(id, Geometry::Polygon(points))
    }

    #[must_use]
    pub fn polyline(id: impl Into<ShapeId>, points: Vec<Point>) -> Self {
        Self::new(id, Geometry::Polyline(points))
    }

    /// A bezier curve through `points`.
    ///
    /// # Errors
    ///
    /// [`CanvasError::IncompleteShape`] with fewer than three points.
    pub fn bezier(id: impl Into<ShapeId>, points: Vec<Point>) -> Result<Self, CanvasError> {
        if points.len() < BEZIER_POINT_COUNT {
            return Err(CanvasError::IncompleteShape {
                shape_type: ShapeType::BezierCurve,
                points: points.len(),
                required: BEZIER_POINT_COUNT,
            });
        }
        Ok(Self::new(id, Geometry::BezierCurve(CurveGeometry { points, handle: None })))
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.geometry.shape_type()
    }

    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.shape_type().is_edge()
    }

    /// Port with `port_id`, if this shape has it.
    #[must_use]
    pub fn port(&self, port_id: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    pub fn port_mut(&mut self, port_id: &str) -> Option<&mut Port> {
        self.ports.iter_mut().find(|p| p.id == port_id)
    }

    #[must_use]
    pub fn first_port(&self) -> Option<&Port> {
        self.ports.first()
    }

    #[must_use]
    pub fn last_port(&self) -> Option<&Port> {
        self.ports.last()
    }

    /// First port with nothing plugged in.
    #[must_use]
    pub fn next_empty_port(&self) -> Option<&Port> {
        self.ports.iter().find(|p| p.is_empty())
    }

    /// Shift the shape and its ports by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.geometry.translate(dx, dy);
        let bounds = self.geometry.bounds();
        port::relayout(&mut self.ports, &bounds);
    }

    /// Ids of every element this shape draws on a surface.
    #[must_use]
    pub fn element_ids(&self) -> Vec<String> {
        let mut ids = vec![self.id.clone()];
        if !self.title.is_empty() {
            ids.push(title_id(&self.id));
        }
        if matches!(self.geometry, Geometry::BezierCurve(_)) {
            ids.push(curve_path_id(&self.id));
            ids.push(control_point_id(&self.id));
        }
        ids.extend(self.ports.iter().map(|p| p.id.clone()));
        ids
    }

    /// Draw the shape, or bring an existing drawing up to date. `canvas_id`
    /// scopes the shared definitions (the arrow marker) the shape refers to.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn render(&self, surface: &mut dyn Surface, canvas_id: &str) -> Result<(), SurfaceError> {
        let id = self.id.as_str();
        match &self.geometry {
            Geometry::Line(line) => {
                surface.ensure(None, "line", id)?;
                let mut attrs = vec![
                    ("x1", line.dim.start.x.to_string()),
                    ("y1", line.dim.start.y.to_string()),
                    ("x2", line.dim.end.x.to_string()),
                    ("y2", line.dim.end.y.to_string()),
                    ("style", self.edge_style()),
                    ("data-type", "edge-base".to_string()),
                    ("data-direction", line.dim.direction().code().to_string()),
                ];
                if line.dim.has_arrow {
                    let marker = format!("url(#{})", arrow_marker_id(canvas_id));
                    if matches!(line.dim.arrow_type, ArrowType::Right | ArrowType::Both) {
                        attrs.push(("marker-end", marker.clone()));
                    }
                    if matches!(line.dim.arrow_type, ArrowType::Left | ArrowType::Both) {
                        attrs.push(("marker-start", marker));
                    }
                }
                surface.set_attrs(id, &attrs)?;
            }
            Geometry::Rectangle(r) => {
                surface.ensure(None, "rect", id)?;
                surface.set_attrs(
                    id,
                    &[
                        ("x", r.left.to_string()),
                        ("y", r.top.to_string()),
                        ("height", r.height.to_string()),
                        ("width", r.width.to_string()),
                        ("style", self.node_style()),
                        ("data-type", "node-base".to_string()),
                    ],
                )?;
            }
            Geometry::Circle(c) => {
                surface.ensure(None, "circle", id)?;
                surface.set_attrs(
                    id,
                    &[
                        ("cx", c.cx.to_string()),
                        ("cy", c.cy.to_string()),
                        ("r", c.r.to_string()),
                        ("style", self.node_style()),
                        ("data-type", "node-base".to_string()),
                    ],
                )?;
            }
            Geometry::Ellipse(e) => {
                surface.ensure(None, "ellipse", id)?;
                surface.set_attrs(
                    id,
                    &[
                        ("cx", e.cx.to_string()),
                        ("cy", e.cy.to_string()),
                        ("rx", e.rx.to_string()),
                        ("ry", e.ry.to_string()),
                        ("style", self.node_style()),
                        ("data-type", "node-base".to_string()),
                    ],
                )?;
            }
            Geometry::Polygon(pts) => {
                surface.ensure(None, "polygon", id)?;
                surface.set_attrs(
                    id,
                    &[
                        ("points", points_attr(pts)),
                        ("style", self.node_style()),
                        ("data-type", "node-base".to_string()),
                    ],
                )?;
            }
            Geometry::Polyline(pts) => {
                surface.ensure(None, "polyline", id)?;
                surface.set_attrs(
                    id,
                    &[
                        ("points", points_attr(pts)),
                        ("style", self.node_style()),
                        ("data-type", "edge-base".to_string()),
                    ],
                )?;
            }
            Geometry::BezierCurve(curve) => self.render_curve(surface, curve)?,
        }

        if !self.title.is_empty() {
            let title_id = title_id(id);
            surface.ensure(Some(id), "title", &title_id)?;
            surface.set_text(&title_id, &self.title)?;
        }
        for port in &self.ports {
            port.render(surface)?;
        }
        Ok(())
    }

    fn render_curve(&self, surface: &mut dyn Surface, curve: &CurveGeometry) -> Result<(), SurfaceError> {
        let id = self.id.as_str();
        surface.ensure(None, "g", id)?;
        surface.set_attr(id, "data-type", "edge-base")?;

        let path_id = curve_path_id(id);
        surface.ensure(Some(id), "path", &path_id)?;
        surface.set_attrs(
            &path_id,
            &[
                ("d", basis_path(&curve.points)),
                ("stroke", self.stroke.color.clone()),
                ("stroke-width", format!("{CURVE_STROKE_WIDTH}px")),
                ("fill", "none".to_string()),
                ("data-type", "node-base-inner".to_string()),
            ],
        )?;

        let handle = curve.handle.unwrap_or_else(|| curve.control_point());
        let handle_id = control_point_id(id);
        surface.ensure(Some(id), "circle", &handle_id)?;
        surface.set_attrs(
            &handle_id,
            &[
                ("cx", handle.x.to_string()),
                ("cy", handle.y.to_string()),
                ("r", CONTROL_POINT_RADIUS.to_string()),
                ("style", CONTROL_POINT_STYLE.to_string()),
                ("data-type", "control-point".to_string()),
            ],
        )
    }

    fn edge_style(&self) -> String {
        let base = format!("stroke: {};stroke-width: {}px;", self.stroke.color, self.stroke.width);
        with_extra(base, &self.style)
    }

    fn node_style(&self) -> String {
        let base = format!("stroke: {};stroke-width: {}px; fill: none;", self.stroke.color, self.stroke.width);
        with_extra(base, &self.style)
    }
}

/// Element id of the arrowhead marker defined by a canvas.
#[must_use]
pub fn arrow_marker_id(canvas_id: &str) -> String {
    format!("{canvas_id}_{ARROW_MARKER_SUFFIX}")
}

fn title_id(shape_id: &str) -> String {
    format!("{shape_id}_title")
}

fn curve_path_id(shape_id: &str) -> String {
    format!("{shape_id}_line")
}

/// Element id of a curve's draggable control handle.
#[must_use]
pub fn control_point_id(shape_id: &str) -> String {
    format!("{shape_id}_control_point")
}

fn with_extra(base: String, extra: &str) -> String {
    if extra.is_empty() { base } else { format!("{base} {extra}") }
}
