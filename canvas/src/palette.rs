//! Tool palette icons.
//!
//! Each tool has a fixed 50×50 icon: a small glyph of the shape it draws
//! plus a label. Icons depend only on the tool and the id of the canvas
//! whose arrow marker they point at.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use crate::error::SurfaceError;
use crate::input::{Tool, ToolType};
use crate::shape::{ShapeType, arrow_marker_id};
use crate::surface::Surface;

/// Side length of one palette cell.
pub const TOOL_CELL: f64 = 50.0;

const GLYPH_STYLE: &str = "stroke: black; stroke-width: 2px; fill:none";
const LABEL_STYLE: &str = "stroke:none;fill:black";

/// One vector primitive of an icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<&'static str>,
}

impl Primitive {
    fn new(tag: &'static str, attrs: &[(&'static str, &str)]) -> Self {
        Self {
            tag,
            attrs: attrs.iter().map(|(k, v)| (*k, (*v).to_string())).collect(),
            text: None,
        }
    }

    fn label(text: &'static str) -> Self {
        Self {
            tag: "text",
            attrs: vec![
                ("x", "25".to_string()),
                ("y", "40".to_string()),
                ("text-anchor", "middle".to_string()),
                ("alignment-baseline", "central".to_string()),
                ("font-size", ".7em".to_string()),
                ("font-family", "Arial, Helvetica, sans-serif".to_string()),
                ("style", LABEL_STYLE.to_string()),
            ],
            text: Some(text),
        }
    }
}

/// Element id of a tool's palette entry.
#[must_use]
pub fn tool_element_id(canvas_id: &str, tool: Tool) -> String {
    format!("{canvas_id}_{}_tool", tool.name())
}

/// The icon for `tool` on canvas `canvas_id`.
#[must_use]
pub fn icon(tool: Tool, canvas_id: &str) -> Vec<Primitive> {
    let marker = format!("url(#{})", arrow_marker_id(canvas_id));
    match tool {
        Tool::Command(ToolType::Select) => vec![
            Primitive::new(
                "line",
                &[
                    ("x1", "25"),
                    ("y1", "25"),
                    ("x2", "35"),
                    ("y2", "35"),
                    ("style", "stroke: black; stroke-width: 2px;"),
                    ("marker-end", marker.as_str()),
                    ("transform", "rotate(180 25 25)"),
                ],
            ),
            Primitive::label("SELECT"),
        ],
        Tool::Command(other) => vec![Primitive::label(other.name())],
        Tool::Draw(shape) => shape_icon(shape),
    }
}

fn shape_icon(shape: ShapeType) -> Vec<Primitive> {
    let glyph = match shape {
        ShapeType::Line => Primitive::new(
            "line",
            &[
                ("x1", "23"),
                ("y1", "23"),
                ("x2", "38"),
                ("y2", "38"),
                ("style", "stroke: black; stroke-width: 2px;"),
                ("transform", "rotate(180 25 25)"),
            ],
        ),
        ShapeType::Rectangle => Primitive::new(
            "rect",
            &[
                ("x", "21"),
                ("y", "21"),
                ("height", "17"),
                ("width", "17"),
                ("style", GLYPH_STYLE),
                ("transform", "rotate(180 23 23)"),
            ],
        ),
        ShapeType::Circle => Primitive::new(
            "circle",
            &[("cx", "19"), ("cy", "19"), ("r", "10"), ("style", GLYPH_STYLE), ("transform", "rotate(180 18 18)")],
        ),
        ShapeType::Ellipse => Primitive::new(
            "ellipse",
            &[
                ("cx", "15"),
                ("cy", "19"),
                ("rx", "15"),
                ("ry", "10"),
                ("style", GLYPH_STYLE),
                ("transform", "rotate(180 18 18)"),
            ],
        ),
        ShapeType::Polygon => Primitive::new(
            "polygon",
            &[("points", "5,10 0,30 25,25 28,10"), ("style", GLYPH_STYLE), ("transform", "rotate(180 18 18)")],
        ),
        ShapeType::Polyline => Primitive::new(
            "polyline",
            &[("points", "5,10 0,30 25,10 28,30"), ("style", GLYPH_STYLE), ("transform", "rotate(180 18 18)")],
        ),
        ShapeType::BezierCurve | ShapeType::Path => Primitive::new(
            "path",
            &[("d", "M 5 10 q 0 30 25 10"), ("style", GLYPH_STYLE), ("transform", "rotate(180 18 18)")],
        ),
        ShapeType::Custom => return vec![Primitive::label("CUSTOM")],
    };
    let label = match shape {
        ShapeType::BezierCurve => "BEZIRE",
        other => other.tool_name(),
    };
    vec![glyph, Primitive::label(label)]
}

/// Draw a tool's palette entry under `parent`, in cell `index`.
///
/// # Errors
///
/// Propagates surface failures.
pub fn render_tool_item(
    surface: &mut dyn Surface,
    parent: &str,
    canvas_id: &str,
    tool: Tool,
    index: usize,
    selected: bool,
) -> Result<(), SurfaceError> {
    let id = tool_element_id(canvas_id, tool);
    surface.ensure(Some(parent), "g", &id)?;
    #[allow(clippy::cast_precision_loss)]
    let offset = index as f64 * TOOL_CELL;
    surface.set_attrs(
        &id,
        &[
            ("transform", format!("translate(0 {offset})")),
            ("data-type", "tool".to_string()),
            ("data-tool", tool.name().to_string()),
            ("data-selected", selected.to_string()),
        ],
    )?;
    for (i, primitive) in icon(tool, canvas_id).into_iter().enumerate() {
        let child = format!("{id}_{i}");
        surface.ensure(Some(&id), primitive.tag, &child)?;
        surface.set_attrs(&child, &primitive.attrs)?;
        if let Some(text) = primitive.text {
            surface.set_text(&child, text)?;
        }
    }
    Ok(())
}
