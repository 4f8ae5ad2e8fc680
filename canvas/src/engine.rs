//! The canvas: shape ownership, the tool palette, and the pointer state machine.
//!
//! [`Canvas`] is generic over its [`Surface`] so the whole interaction model
//! runs headless in tests and in the CLI, and unchanged in the browser over
//! [`crate::dom::DomSurface`]. Handlers return [`Action`]s for the host:
//! naming prompts, interactive registration, and change notifications.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;
use uuid::Uuid;

use crate::config::{CanvasConfig, DragOptions};
use crate::consts::{
    BEZIER_POINT_COUNT, DOUBLE_TAP_MS, GHOST_INITIAL_SIZE, GHOST_STYLE, GHOST_SUFFIX, INTERACTIVE_CLASS,
    MIN_POLY_POINTS,
};
use crate::curve::basis_path;
use crate::error::CanvasError;
use crate::geometry::{CircleDimension, EllipseDimension, Point, RectDimension, floor_extent, points_attr};
use crate::input::{Draft, Gesture, InputState, MouseState, PointerEvent, PointerKind, Tool, UiState};
use crate::palette;
use crate::port::{Port, PortType};
use crate::shape::{
    CurveGeometry, EndpointRef, Geometry, PortRef, Shape, ShapeId, ShapeType, arrow_marker_id, control_point_id,
};
use crate::surface::Surface;

/// Notifications returned from canvas operations for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pointer listeners should be attached to this surface element. Emitted once.
    AttachListeners { surface_id: String },
    /// A shape is complete; call [`Canvas::resolve_name`] with the user's answer.
    NameRequested { shape_type: ShapeType },
    /// Give this element drag/resize/rotate handling.
    RegisterInteractive { id: ShapeId, options: DragOptions },
    ShapeAdded { id: ShapeId, shape_type: ShapeType },
    ShapeRemoved { id: ShapeId },
    /// The provisional shape was thrown away.
    DraftDiscarded { shape_type: ShapeType },
    ToolChanged(Tool),
}

/// A diagram: nodes, edges, tools, and pointer-interaction state.
pub struct Canvas<S: Surface> {
    pub config: CanvasConfig,
    surface: S,
    nodes: Vec<Shape>,
    edges: Vec<Shape>,
    tools: Vec<Tool>,
    ui: UiState,
    input: InputState,
    rendered: bool,
}

impl<S: Surface> Canvas<S> {
    /// An empty canvas whose palette holds only the select tool.
    #[must_use]
    pub fn new(config: CanvasConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            nodes: Vec::new(),
            edges: Vec::new(),
            tools: vec![Tool::default()],
            ui: UiState::default(),
            input: InputState::Idle,
            rendered: false,
        }
    }

    /// An empty canvas with a palette entry for every drawable shape.
    #[must_use]
    pub fn with_default_tools(config: CanvasConfig, surface: S) -> Self {
        let mut canvas = Self::new(config, surface);
        canvas.tools.extend(ShapeType::DRAWABLE.into_iter().map(Tool::Draw));
        canvas
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn nodes(&self) -> &[Shape] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Shape] {
        &self.edges
    }

    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    #[must_use]
    pub fn selected_tool(&self) -> Tool {
        self.ui.tool
    }

    /// Shape type the selected tool draws.
    #[must_use]
    pub fn shape_type(&self) -> Option<ShapeType> {
        self.ui.tool.shape_type()
    }

    #[must_use]
    pub fn mouse_state(&self) -> MouseState {
        self.ui.mouse
    }

    #[must_use]
    pub fn cursor(&self) -> Point {
        self.ui.cursor
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Element id of this canvas's provisional shape.
    #[must_use]
    pub fn ghost_id(&self) -> String {
        format!("{}_{GHOST_SUFFIX}", self.config.id)
    }

    // --- Rendering ---

    /// Draw the chrome, every owned shape in insertion order, and request
    /// listener wiring. Chrome and listeners happen on the first call only;
    /// later calls just bring shapes up to date.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn render(&mut self) -> Result<Vec<Action>, CanvasError> {
        let first = !self.rendered;
        if first {
            self.render_chrome()?;
        }
        for shape in self.nodes.iter().chain(self.edges.iter()) {
            shape.render(&mut self.surface, &self.config.id)?;
        }
        let mut actions = Vec::new();
        if first {
            let ids: Vec<ShapeId> = self.nodes.iter().chain(self.edges.iter()).map(|s| s.id.clone()).collect();
            for id in ids {
                actions.push(self.register_interactive(&id)?);
            }
            self.rendered = true;
            actions.push(Action::AttachListeners { surface_id: self.config.surface_id() });
        }
        Ok(actions)
    }

    /// Mark a rendered shape as interactive and ask the host to wire it.
    /// The only place interactive handling is set up, for initial and
    /// later-added shapes alike.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Surface`] if the element is not on the surface.
    pub fn register_interactive(&mut self, id: &str) -> Result<Action, CanvasError> {
        self.surface.set_attr(id, "class", INTERACTIVE_CLASS)?;
        Ok(Action::RegisterInteractive { id: id.to_string(), options: self.config.drag.clone() })
    }

    fn render_chrome(&mut self) -> Result<(), CanvasError> {
        let id = self.config.id.clone();

        let defs = format!("{id}_defs");
        self.surface.ensure(None, "defs", &defs)?;
        let marker = arrow_marker_id(&id);
        self.surface.ensure(Some(&defs), "marker", &marker)?;
        self.surface.set_attrs(
            &marker,
            &[
                ("refX", "6".to_string()),
                ("refY", "6".to_string()),
                ("markerWidth", "30".to_string()),
                ("markerHeight", "30".to_string()),
                ("markerUnits", "userSpaceOnUse".to_string()),
                ("orient", "auto".to_string()),
            ],
        )?;
        let arrow_path = format!("{marker}_path");
        self.surface.ensure(Some(&marker), "path", &arrow_path)?;
        self.surface.set_attrs(
            &arrow_path,
            &[("d", "M 0 0 12 6 0 12 3 6".to_string()), ("style", "fill: black;".to_string())],
        )?;

        let readout = format!("{id}_readout");
        self.surface.ensure(None, "g", &readout)?;
        self.surface.set_attr(&readout, "data-type", "readout")?;
        for (suffix, y) in [("x_label", 12), ("y_label", 24), ("mouse_state", 36)] {
            let label = format!("{id}_{suffix}");
            self.surface.ensure(Some(&readout), "text", &label)?;
            self.surface.set_attrs(
                &label,
                &[("x", "4".to_string()), ("y", y.to_string()), ("font-size", "9px".to_string())],
            )?;
        }

        let toolbox = self.toolbox_id();
        self.surface.ensure(None, "g", &toolbox)?;
        self.surface.set_attr(&toolbox, "data-type", "toolbox")?;
        self.render_palette()?;
        self.write_readout()
    }

    fn toolbox_id(&self) -> String {
        format!("{}_toolbox", self.config.id)
    }

    fn render_palette(&mut self) -> Result<(), CanvasError> {
        let toolbox = self.toolbox_id();
        let selected = self.ui.tool;
        for (index, tool) in self.tools.iter().enumerate() {
            palette::render_tool_item(&mut self.surface, &toolbox, &self.config.id, *tool, index, *tool == selected)?;
        }
        Ok(())
    }

    fn update_readout(&mut self) -> Result<(), CanvasError> {
        if self.rendered {
            self.write_readout()
        } else {
            Ok(())
        }
    }

    fn write_readout(&mut self) -> Result<(), CanvasError> {
        let id = &self.config.id;
        self.surface.set_text(&format!("{id}_x_label"), &format!("X: {}", self.ui.cursor.x.trunc()))?;
        self.surface.set_text(&format!("{id}_y_label"), &format!("Y: {}", self.ui.cursor.y.trunc()))?;
        self.surface.set_text(&format!("{id}_mouse_state"), &format!("STATE: {}", self.ui.mouse.name()))?;
        Ok(())
    }

    fn set_mouse(&mut self, state: MouseState) -> Result<(), CanvasError> {
        if self.ui.mouse != state {
            debug!(from = self.ui.mouse.name(), to = state.name(), "mouse state");
        }
        self.ui.mouse = state;
        self.update_readout()
    }

    // --- Nodes and edges ---

    /// Whether `id` is used by the provisional shape, by any element an
    /// owned shape draws, or by any other surface element.
    #[must_use]
    pub fn is_taken(&self, id: &str) -> bool {
        id == self.ghost_id()
            || self
                .nodes
                .iter()
                .chain(self.edges.iter())
                .any(|s| s.element_ids().iter().any(|e| e == id))
            || self.surface.contains(id)
    }

    /// Every element id `shape` would draw must be free.
    fn check_ids(&self, shape: &Shape) -> Result<(), CanvasError> {
        match shape.element_ids().into_iter().find(|id| self.is_taken(id)) {
            Some(id) => Err(CanvasError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    /// Add a node without drawing it. Use before [`Canvas::render`].
    ///
    /// # Errors
    ///
    /// [`CanvasError::DuplicateId`] if the id, or the id of any element the
    /// node draws, is taken.
    pub fn init_node(&mut self, node: Shape) -> Result<(), CanvasError> {
        self.check_ids(&node)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Add a node; once the canvas is rendered, also draw and register it.
    ///
    /// # Errors
    ///
    /// [`CanvasError::DuplicateId`] as for [`Canvas::init_node`], or a
    /// surface failure.
    pub fn add_node(&mut self, node: Shape) -> Result<Vec<Action>, CanvasError> {
        let id = node.id.clone();
        let shape_type = node.shape_type();
        self.init_node(node)?;
        let mut actions = Vec::new();
        if self.rendered {
            if let Some(node) = self.nodes.last() {
                node.render(&mut self.surface, &self.config.id)?;
            }
            actions.push(self.register_interactive(&id)?);
        }
        debug!(%id, shape = shape_type.name(), "node added");
        actions.push(Action::ShapeAdded { id, shape_type });
        Ok(actions)
    }

    /// Add an edge without drawing it, resolving line endpoints against the
    /// current nodes. Use before [`Canvas::render`].
    ///
    /// # Errors
    ///
    /// [`CanvasError::DuplicateId`], [`CanvasError::UnresolvedEndpoint`], or
    /// [`CanvasError::NoFreePort`]. Nothing is connected on error.
    pub fn init_edge(&mut self, mut edge: Shape) -> Result<(), CanvasError> {
        self.check_ids(&edge)?;
        let touched = self.resolve_endpoints(&mut edge)?;
        self.edges.push(edge);
        if self.rendered {
            self.render_node_ports(&touched)?;
        }
        Ok(())
    }

    /// Add an edge; once the canvas is rendered, also draw and register it.
    ///
    /// # Errors
    ///
    /// See [`Canvas::init_edge`].
    pub fn add_edge(&mut self, edge: Shape) -> Result<Vec<Action>, CanvasError> {
        let id = edge.id.clone();
        let shape_type = edge.shape_type();
        self.init_edge(edge)?;
        let mut actions = Vec::new();
        if self.rendered {
            if let Some(edge) = self.edges.last() {
                edge.render(&mut self.surface, &self.config.id)?;
            }
            actions.push(self.register_interactive(&id)?);
        }
        debug!(%id, shape = shape_type.name(), "edge added");
        actions.push(Action::ShapeAdded { id, shape_type });
        Ok(actions)
    }

    /// Remove a node and its elements. Edges plugged into its ports keep
    /// their coordinates but are no longer bound.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] for an unknown id, or a surface failure.
    pub fn remove_node(&mut self, id: &str) -> Result<Shape, CanvasError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CanvasError::NotFound(id.to_string()))?;
        let node = self.nodes.remove(index);
        for element in node.element_ids() {
            self.surface.remove(&element)?;
        }
        for edge in &mut self.edges {
            if let Geometry::Line(line) = &mut edge.geometry {
                if line.start_port.as_ref().is_some_and(|p| p.node == node.id) {
                    line.start_port = None;
                }
                if line.end_port.as_ref().is_some_and(|p| p.node == node.id) {
                    line.end_port = None;
                }
            }
        }
        debug!(%id, "node removed");
        Ok(node)
    }

    /// Remove an edge and its element, freeing any ports it was plugged into.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] for an unknown id, or a surface failure.
    pub fn remove_edge(&mut self, id: &str) -> Result<Shape, CanvasError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CanvasError::NotFound(id.to_string()))?;
        let edge = self.edges.remove(index);
        for element in edge.element_ids() {
            self.surface.remove(&element)?;
        }
        let mut touched = Vec::new();
        if let Geometry::Line(line) = &edge.geometry {
            for bound in [&line.start_port, &line.end_port].into_iter().flatten() {
                if let Some(port) = self.node_port_mut(&bound.node, &bound.port) {
                    port.disconnect();
                    touched.push(bound.node.clone());
                }
            }
        }
        if self.rendered {
            self.render_node_ports(&touched)?;
        }
        debug!(%id, "edge removed");
        Ok(edge)
    }

    /// Remove a shape from whichever collection owns it.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] for an unknown id, or a surface failure.
    pub fn remove_shape(&mut self, id: &str) -> Result<Action, CanvasError> {
        if self.get_node(id).is_some() {
            self.remove_node(id)?;
        } else {
            self.remove_edge(id)?;
        }
        Ok(Action::ShapeRemoved { id: id.to_string() })
    }

    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&Shape> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn get_edge(&self, id: &str) -> Option<&Shape> {
        self.edges.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn get_first_port_of_node(&self, id: &str) -> Option<&Port> {
        self.get_node(id)?.first_port()
    }

    #[must_use]
    pub fn get_last_port_of_node(&self, id: &str) -> Option<&Port> {
        self.get_node(id)?.last_port()
    }

    #[must_use]
    pub fn get_all_ports_of_node(&self, id: &str) -> Option<&[Port]> {
        self.get_node(id).map(|n| n.ports.as_slice())
    }

    #[must_use]
    pub fn get_next_empty_port_of_node(&self, id: &str) -> Option<&Port> {
        self.get_node(id)?.next_empty_port()
    }

    /// The node and port whose box contains `pt`.
    #[must_use]
    pub fn port_at(&self, pt: Point) -> Option<(&Shape, &Port)> {
        self.nodes
            .iter()
            .find_map(|n| n.ports.iter().find(|p| p.contains(pt)).map(|p| (n, p)))
    }

    fn node_port_mut(&mut self, node: &str, port: &str) -> Option<&mut Port> {
        self.nodes.iter_mut().find(|n| n.id == node)?.port_mut(port)
    }

    fn render_node_ports(&mut self, node_ids: &[ShapeId]) -> Result<(), CanvasError> {
        for node in self.nodes.iter().filter(|n| node_ids.contains(&n.id)) {
            for port in &node.ports {
                port.render(&mut self.surface)?;
            }
        }
        Ok(())
    }

    /// Bind `ById` endpoints of a line to free ports. Returns the ids of the
    /// nodes whose ports changed.
    fn resolve_endpoints(&mut self, edge: &mut Shape) -> Result<Vec<ShapeId>, CanvasError> {
        let Geometry::Line(line) = &mut edge.geometry else {
            return Ok(Vec::new());
        };
        let start = self.pick_port(&line.from, None)?;
        let end = self.pick_port(&line.to, start.as_ref())?;

        let mut touched = Vec::new();
        for (picked, port_type) in [(start, PortType::Source), (end, PortType::Target)] {
            let Some(port_ref) = picked else {
                continue;
            };
            let Some(port) = self.node_port_mut(&port_ref.node, &port_ref.port) else {
                return Err(CanvasError::UnresolvedEndpoint(port_ref.node));
            };
            port.connect(&edge.id, port_type);
            let point = port.connection_point();
            match port_type {
                PortType::Source => {
                    line.dim.start = point;
                    line.start_port = Some(port_ref.clone());
                }
                PortType::Target => {
                    line.dim.end = point;
                    line.end_port = Some(port_ref.clone());
                }
            }
            touched.push(port_ref.node);
        }
        Ok(touched)
    }

    /// The port an endpoint would bind to, skipping `taken`.
    fn pick_port(&self, endpoint: &EndpointRef, taken: Option<&PortRef>) -> Result<Option<PortRef>, CanvasError> {
        let EndpointRef::ById(node_id) = endpoint else {
            return Ok(None);
        };
        let node = self
            .get_node(node_id)
            .ok_or_else(|| CanvasError::UnresolvedEndpoint(node_id.clone()))?;
        let port = node
            .ports
            .iter()
            .find(|p| p.is_empty() && taken.is_none_or(|t| !(t.node == node.id && t.port == p.id)))
            .ok_or_else(|| CanvasError::NoFreePort(node_id.clone()))?;
        Ok(Some(PortRef { node: node.id.clone(), port: port.id.clone() }))
    }

    // --- Interactive edits ---

    /// Move a shape by `(dx, dy)`, as reported by the interactive layer.
    /// Moving a node drags the ends of lines plugged into it; moving a line
    /// unplugs it and re-plugs each end into any free port it lands on.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] for an unknown id, or a surface failure.
    pub fn translate_shape(&mut self, id: &str, dx: f64, dy: f64) -> Result<(), CanvasError> {
        if let Some(index) = self.nodes.iter().position(|n| n.id == id) {
            self.nodes[index].translate(dx, dy);
            let node = &self.nodes[index];
            let mut moved_edges = Vec::new();
            for port in &node.ports {
                let (Some(edge_id), Some(port_type)) = (&port.connector, port.port_type) else {
                    continue;
                };
                let point = port.connection_point();
                if let Some(edge) = self.edges.iter_mut().find(|e| &e.id == edge_id) {
                    if let Geometry::Line(line) = &mut edge.geometry {
                        match port_type {
                            PortType::Source => line.dim.start = point,
                            PortType::Target => line.dim.end = point,
                        }
                        moved_edges.push(edge.id.clone());
                    }
                }
            }
            if self.rendered {
                self.nodes[index].render(&mut self.surface, &self.config.id)?;
                for edge in self.edges.iter().filter(|e| moved_edges.contains(&e.id)) {
                    edge.render(&mut self.surface, &self.config.id)?;
                }
            }
            return Ok(());
        }

        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CanvasError::NotFound(id.to_string()))?;
        self.edges[index].translate(dx, dy);
        let mut touched = Vec::new();
        if let Geometry::Line(line) = &self.edges[index].geometry {
            let (start, end) = (line.dim.start, line.dim.end);
            let bound: Vec<PortRef> = [&line.start_port, &line.end_port].into_iter().flatten().cloned().collect();
            for b in bound {
                if let Some(port) = self.node_port_mut(&b.node, &b.port) {
                    port.disconnect();
                }
                touched.push(b.node);
            }
            let start_port = self.snap_to_port(start, id, PortType::Source);
            let end_port = self.snap_to_port(end, id, PortType::Target);
            let edge = &mut self.edges[index];
            if let Geometry::Line(line) = &mut edge.geometry {
                line.start_port = start_port.clone();
                line.end_port = end_port.clone();
                if let Some(p) = &start_port {
                    if let Some(port) = self.nodes.iter().find(|n| n.id == p.node).and_then(|n| n.port(&p.port)) {
                        line.dim.start = port.connection_point();
                    }
                    touched.push(p.node.clone());
                }
                if let Some(p) = &end_port {
                    if let Some(port) = self.nodes.iter().find(|n| n.id == p.node).and_then(|n| n.port(&p.port)) {
                        line.dim.end = port.connection_point();
                    }
                    touched.push(p.node.clone());
                }
            }
        }
        if self.rendered {
            self.edges[index].render(&mut self.surface, &self.config.id)?;
            self.render_node_ports(&touched)?;
        }
        Ok(())
    }

    /// Plug `edge_id` into the free port under `pt`, if there is one.
    fn snap_to_port(&mut self, pt: Point, edge_id: &str, port_type: PortType) -> Option<PortRef> {
        let found = self
            .port_at(pt)
            .filter(|(_, p)| p.is_empty())
            .map(|(n, p)| PortRef { node: n.id.clone(), port: p.id.clone() })?;
        let port = self.node_port_mut(&found.node, &found.port)?;
        port.connect(edge_id, port_type);
        Some(found)
    }

    /// Move the control handle of a bezier curve. Only the handle is
    /// redrawn; the curve keeps its points until the drag ends.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] if `id` is not a curve, or a surface failure.
    pub fn drag_control_point(&mut self, id: &str, pt: Point) -> Result<(), CanvasError> {
        let curve = self.curve_mut(id)?;
        curve.handle = Some(pt);
        if self.rendered {
            let handle_id = control_point_id(id);
            self.surface.set_attr(&handle_id, "cx", &pt.x.to_string())?;
            self.surface.set_attr(&handle_id, "cy", &pt.y.to_string())?;
        }
        Ok(())
    }

    /// Finish a control-handle drag: the handle position becomes the
    /// curve's interior point and the curve is redrawn.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] if `id` is not a curve, or a surface failure.
    pub fn end_control_point_drag(&mut self, id: &str) -> Result<(), CanvasError> {
        let curve = self.curve_mut(id)?;
        if let Some(handle) = curve.handle.take() {
            if let Some(p) = curve.points.get_mut(1) {
                *p = handle;
            }
        }
        if self.rendered {
            if let Some(edge) = self.edges.iter().find(|e| e.id == id) {
                edge.render(&mut self.surface, &self.config.id)?;
            }
        }
        Ok(())
    }

    fn curve_mut(&mut self, id: &str) -> Result<&mut CurveGeometry, CanvasError> {
        self.edges
            .iter_mut()
            .find(|e| e.id == id)
            .and_then(|e| match &mut e.geometry {
                Geometry::BezierCurve(c) => Some(c),
                _ => None,
            })
            .ok_or_else(|| CanvasError::NotFound(id.to_string()))
    }

    // --- Tools ---

    /// Append a tool to the palette.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotDrawable`] for shape types no gesture creates;
    /// [`CanvasError::DuplicateId`] if the palette already holds the tool.
    pub fn add_tool(&mut self, tool: Tool) -> Result<(), CanvasError> {
        if matches!(tool, Tool::Draw(_)) && !tool.is_drawable() {
            return Err(CanvasError::NotDrawable(tool));
        }
        if self.tools.contains(&tool) {
            return Err(CanvasError::DuplicateId(palette::tool_element_id(&self.config.id, tool)));
        }
        self.tools.push(tool);
        if self.rendered {
            self.render_palette()?;
        }
        Ok(())
    }

    /// Remove a tool from the palette. The select tool in the first slot
    /// always stays. Removing the selected tool falls back to select.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] if the tool is not removable.
    pub fn remove_tool(&mut self, tool: Tool) -> Result<Vec<Action>, CanvasError> {
        let index = self
            .tools
            .iter()
            .skip(1)
            .position(|t| *t == tool)
            .map(|i| i + 1)
            .ok_or_else(|| CanvasError::NotFound(tool.name().to_string()))?;
        self.tools.remove(index);
        self.surface.remove(&palette::tool_element_id(&self.config.id, tool))?;
        if self.ui.tool == tool {
            return self.change_tool(0);
        }
        if self.rendered {
            self.render_palette()?;
        }
        Ok(Vec::new())
    }

    /// Select the palette entry at `index`. Out-of-range indexes are
    /// ignored. Any gesture in progress is aborted and its provisional
    /// shape discarded.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn change_tool(&mut self, index: usize) -> Result<Vec<Action>, CanvasError> {
        let Some(&tool) = self.tools.get(index) else {
            return Ok(Vec::new());
        };
        let mut actions = Vec::new();
        if let Some(shape_type) = self.abort_gesture()? {
            actions.push(Action::DraftDiscarded { shape_type });
        }
        self.ui.tool = tool;
        if self.rendered {
            self.render_palette()?;
        }
        debug!(%tool, "tool changed");
        actions.push(Action::ToolChanged(tool));
        Ok(actions)
    }

    /// Select `tool` if it is in the palette.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NotFound`] if the palette does not hold it.
    pub fn set_tool(&mut self, tool: Tool) -> Result<Vec<Action>, CanvasError> {
        let index = self
            .tools
            .iter()
            .position(|t| *t == tool)
            .ok_or_else(|| CanvasError::NotFound(tool.name().to_string()))?;
        self.change_tool(index)
    }

    /// Handle a click on a palette element (`{canvas}_{TOOL}_tool`).
    ///
    /// # Errors
    ///
    /// Propagates surface failures. Unknown ids are ignored.
    pub fn on_tool_clicked(&mut self, element_id: &str) -> Result<Vec<Action>, CanvasError> {
        let index = self
            .tools
            .iter()
            .position(|t| palette::tool_element_id(&self.config.id, *t) == element_id);
        match index {
            Some(i) => self.change_tool(i),
            None => Ok(Vec::new()),
        }
    }

    // --- Pointer input ---

    /// Pointer pressed.
    ///
    /// Accepted only while released (up, move, or leave) and while no shape
    /// is waiting for a name. Single-shot tools start a provisional shape;
    /// multi-click tools add a point.
    ///
    /// # Errors
    ///
    /// Propagates surface failures, and finalization errors when a touch
    /// double-tap completes a polygon or polyline.
    pub fn on_pointer_down(&mut self, ev: PointerEvent) -> Result<Vec<Action>, CanvasError> {
        if matches!(self.input, InputState::PendingCommit { .. }) {
            debug!("pointer-down ignored: shape awaiting a name");
            return Ok(Vec::new());
        }
        if self.ui.mouse.is_pressed() {
            return Ok(Vec::new());
        }
        self.ui.cursor = ev.pos;
        self.set_mouse(MouseState::Down)?;

        let (Some(shape_type), Some(gesture)) = (self.ui.tool.shape_type(), self.ui.tool.gesture()) else {
            // Select and command tools: nothing to create. Clearing the
            // selection on an empty-canvas click is not decided yet.
            return Ok(Vec::new());
        };

        match gesture {
            Gesture::SingleShot => {
                self.input = InputState::Sizing { shape_type, start: ev.pos, current: ev.pos };
                self.draw_ghost(None)?;
                Ok(Vec::new())
            }
            Gesture::MultiClick => {
                self.push_point(shape_type, ev.pos);
                self.draw_ghost(None)?;
                // The second of two quick taps is kept as a point, then finalizes.
                if ev.kind == PointerKind::Touch {
                    let double = self.ui.last_tap_ms.is_some_and(|last| ev.time_ms - last < DOUBLE_TAP_MS);
                    if double {
                        self.ui.last_tap_ms = None;
                        return self.on_double_click(ev);
                    }
                    self.ui.last_tap_ms = Some(ev.time_ms);
                }
                Ok(Vec::new())
            }
            Gesture::ThreeClick => {
                if self.input.collected().len() >= BEZIER_POINT_COUNT {
                    debug!("pointer-down ignored: curve already has its points");
                    return Ok(Vec::new());
                }
                self.push_point(shape_type, ev.pos);
                self.draw_ghost(None)?;
                Ok(Vec::new())
            }
        }
    }

    /// Pointer moved. While pressed, resizes the provisional shape; while
    /// released, previews the next segment of a multi-click shape.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn on_pointer_move(&mut self, ev: PointerEvent) -> Result<Vec<Action>, CanvasError> {
        self.ui.cursor = ev.pos;
        if self.ui.mouse.is_pressed() {
            self.set_mouse(MouseState::Drag)?;
            if let InputState::Sizing { current, .. } = &mut self.input {
                *current = ev.pos;
                self.draw_ghost(None)?;
            }
        } else {
            self.set_mouse(MouseState::Move)?;
            if matches!(self.input, InputState::Collecting { .. }) {
                self.draw_ghost(Some(ev.pos))?;
            }
        }
        Ok(Vec::new())
    }

    /// Pointer released. Completes single-shot shapes and three-point
    /// curves, parking them until the host supplies a name.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn on_pointer_up(&mut self, ev: PointerEvent) -> Result<Vec<Action>, CanvasError> {
        if !self.ui.mouse.is_pressed() {
            return Ok(Vec::new());
        }
        self.ui.cursor = ev.pos;
        self.set_mouse(MouseState::Up)?;

        let geometry = match &self.input {
            InputState::Sizing { shape_type, start, .. } => sized_geometry(*shape_type, *start, ev.pos),
            InputState::Collecting { shape_type: ShapeType::BezierCurve, points }
                if points.len() == BEZIER_POINT_COUNT =>
            {
                Some(Geometry::BezierCurve(CurveGeometry { points: points.clone(), handle: None }))
            }
            _ => None,
        };
        Ok(geometry.map(|g| self.park(g)).into_iter().collect())
    }

    /// Double-activation. Completes a polygon or polyline.
    ///
    /// # Errors
    ///
    /// [`CanvasError::IncompleteShape`] with fewer than two points; the
    /// points stay collected so drawing can continue.
    pub fn on_double_click(&mut self, _ev: PointerEvent) -> Result<Vec<Action>, CanvasError> {
        let InputState::Collecting { shape_type, points } = &self.input else {
            return Ok(Vec::new());
        };
        let geometry = match shape_type {
            ShapeType::Polygon => Geometry::Polygon(points.clone()),
            ShapeType::Polyline => Geometry::Polyline(points.clone()),
            _ => return Ok(Vec::new()),
        };
        if points.len() < MIN_POLY_POINTS {
            return Err(CanvasError::IncompleteShape {
                shape_type: *shape_type,
                points: points.len(),
                required: MIN_POLY_POINTS,
            });
        }
        Ok(vec![self.park(geometry)])
    }

    /// Pointer left the surface. A drag in progress is abandoned; collected
    /// multi-click points are kept.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn on_pointer_leave(&mut self) -> Result<Vec<Action>, CanvasError> {
        let was_pressed = self.ui.mouse.is_pressed();
        self.set_mouse(MouseState::Leave)?;
        if was_pressed && matches!(self.input, InputState::Sizing { .. }) {
            if let Some(shape_type) = self.abort_gesture()? {
                return Ok(vec![Action::DraftDiscarded { shape_type }]);
            }
        }
        Ok(Vec::new())
    }

    /// Answer a [`Action::NameRequested`] prompt.
    ///
    /// `Some(name)` creates the shape with that id and title; a blank name
    /// gets a generated id. `None` discards the provisional shape.
    ///
    /// # Errors
    ///
    /// [`CanvasError::NothingPending`] without a prompt outstanding;
    /// [`CanvasError::DuplicateId`] if the name is taken, in which case the
    /// prompt stays open.
    pub fn resolve_name(&mut self, name: Option<&str>) -> Result<Vec<Action>, CanvasError> {
        let InputState::PendingCommit { draft } = &self.input else {
            return Err(CanvasError::NothingPending);
        };
        let shape_type = draft.shape_type();
        let Some(name) = name else {
            self.abort_gesture()?;
            return Ok(vec![Action::DraftDiscarded { shape_type }]);
        };

        let name = name.trim();
        let shape = if name.is_empty() {
            let id = format!("{}_{}", shape_type.tool_name().to_ascii_lowercase(), Uuid::new_v4().simple());
            Shape::new(id, draft.geometry.clone())
        } else {
            Shape::new(name, draft.geometry.clone()).with_title(name)
        };
        self.check_ids(&shape)?;

        let actions = if shape.is_edge() { self.add_edge(shape)? } else { self.add_node(shape)? };
        let ghost = self.ghost_id();
        self.surface.remove(&ghost)?;
        self.input = InputState::Idle;
        Ok(actions)
    }

    fn park(&mut self, geometry: Geometry) -> Action {
        let shape_type = geometry.shape_type();
        debug!(shape = shape_type.name(), "awaiting name");
        self.input = InputState::PendingCommit { draft: Draft { geometry } };
        Action::NameRequested { shape_type }
    }

    fn push_point(&mut self, shape_type: ShapeType, pt: Point) {
        match &mut self.input {
            InputState::Collecting { points, .. } => points.push(pt),
            _ => self.input = InputState::Collecting { shape_type, points: vec![pt] },
        }
    }

    /// Drop any gesture in progress and its provisional shape.
    fn abort_gesture(&mut self) -> Result<Option<ShapeType>, CanvasError> {
        let shape_type = match &self.input {
            InputState::Idle => return Ok(None),
            InputState::Sizing { shape_type, .. } | InputState::Collecting { shape_type, .. } => *shape_type,
            InputState::PendingCommit { draft } => draft.shape_type(),
        };
        let ghost = self.ghost_id();
        self.surface.remove(&ghost)?;
        self.input = InputState::Idle;
        self.ui.last_tap_ms = None;
        debug!(shape = shape_type.name(), "gesture aborted");
        Ok(Some(shape_type))
    }

    /// Draw the provisional shape for the current gesture. `preview` is an
    /// extra trailing point for multi-click shapes.
    fn draw_ghost(&mut self, preview: Option<Point>) -> Result<(), CanvasError> {
        let (tag, attrs): (&str, Vec<(&str, String)>) = match &self.input {
            InputState::Sizing { shape_type, start, current } => {
                let dx = ghost_extent(current.x - start.x);
                let dy = ghost_extent(current.y - start.y);
                match shape_type {
                    ShapeType::Line => (
                        "line",
                        vec![
                            ("x1", start.x.to_string()),
                            ("y1", start.y.to_string()),
                            ("x2", current.x.to_string()),
                            ("y2", current.y.to_string()),
                        ],
                    ),
                    ShapeType::Rectangle => {
                        let r = RectDimension::from_extents(*start, dx, dy);
                        (
                            "rect",
                            vec![
                                ("x", r.left.to_string()),
                                ("y", r.top.to_string()),
                                ("height", r.height.to_string()),
                                ("width", r.width.to_string()),
                            ],
                        )
                    }
                    ShapeType::Circle => (
                        "circle",
                        vec![("cx", start.x.to_string()), ("cy", start.y.to_string()), ("r", dx.abs().to_string())],
                    ),
                    ShapeType::Ellipse => (
                        "ellipse",
                        vec![
                            ("cx", start.x.to_string()),
                            ("cy", start.y.to_string()),
                            ("rx", dx.abs().to_string()),
                            ("ry", dy.abs().to_string()),
                        ],
                    ),
                    _ => return Ok(()),
                }
            }
            InputState::Collecting { shape_type, points } => {
                let mut pts = points.clone();
                pts.extend(preview);
                match shape_type {
                    ShapeType::Polygon => ("polygon", vec![("points", points_attr(&pts))]),
                    ShapeType::Polyline => ("polyline", vec![("points", points_attr(&pts))]),
                    ShapeType::BezierCurve => ("path", vec![("d", basis_path(&pts))]),
                    _ => return Ok(()),
                }
            }
            InputState::Idle | InputState::PendingCommit { .. } => return Ok(()),
        };
        let ghost = self.ghost_id();
        self.surface.ensure(None, tag, &ghost)?;
        self.surface.set_attrs(&ghost, &attrs)?;
        self.surface.set_attr(&ghost, "style", GHOST_STYLE)?;
        self.surface.set_attr(&ghost, "data-type", "ghost")?;
        Ok(())
    }
}

/// Extent of the provisional shape: never smaller than its initial size.
fn ghost_extent(delta: f64) -> f64 {
    if delta.abs() < GHOST_INITIAL_SIZE { GHOST_INITIAL_SIZE } else { delta }
}

/// Geometry of a single-shot shape dragged from `start` to `end`, with the
/// minimum-size floor applied on each axis.
#[must_use]
pub fn sized_geometry(shape_type: ShapeType, start: Point, end: Point) -> Option<Geometry> {
    let dx = floor_extent(end.x - start.x);
    let dy = floor_extent(end.y - start.y);
    match shape_type {
        ShapeType::Line => Some(Geometry::line(EndpointRef::AtPoint(start), EndpointRef::AtPoint(start.offset(dx, dy)))),
        ShapeType::Rectangle => Some(Geometry::Rectangle(RectDimension::from_extents(start, dx, dy))),
        ShapeType::Circle => Some(Geometry::Circle(CircleDimension::new(start.x, start.y, dx.abs()))),
        ShapeType::Ellipse => Some(Geometry::Ellipse(EllipseDimension::new(start.x, start.y, dx.abs(), dy.abs()))),
        _ => None,
    }
}
