//! Browser-backed surface.
//!
//! Mirrors [`Surface`] calls into a live document under one `<svg>` root.
//! Elements are looked up by id through the document, so ids must be unique
//! page-wide.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::config::CanvasConfig;
use crate::engine::Canvas;
use crate::error::SurfaceError;
use crate::geometry::Point;
use crate::input::{PointerEvent, PointerKind};
use crate::surface::Surface;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A canvas drawing into the browser document.
pub type DomCanvas = Canvas<DomSurface>;

fn dom_err(e: &JsValue) -> SurfaceError {
    SurfaceError::Dom(format!("{e:?}"))
}

/// Surface writing SVG elements into a browser document.
pub struct DomSurface {
    document: Document,
    root: Element,
}

impl DomSurface {
    /// Create the `<svg>` root for `config` inside its container (the body
    /// when no container is configured).
    ///
    /// # Errors
    ///
    /// [`SurfaceError::MissingElement`] if there is no document or container;
    /// [`SurfaceError::Dom`] if the browser rejects element creation.
    pub fn attach(config: &CanvasConfig) -> Result<Self, SurfaceError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SurfaceError::MissingElement("document".to_string()))?;
        let container: Element = match &config.container_id {
            Some(id) => document
                .get_element_by_id(id)
                .ok_or_else(|| SurfaceError::MissingElement(id.clone()))?,
            None => document
                .body()
                .map(Into::into)
                .ok_or_else(|| SurfaceError::MissingElement("body".to_string()))?,
        };

        let root = document.create_element_ns(Some(SVG_NS), "svg").map_err(|e| dom_err(&e))?;
        let style = format!(
            "width: {}; height: {}; background-size: {}px {}px;",
            config.width, config.height, config.grid[0], config.grid[1]
        );
        for (name, value) in [("id", config.surface_id()), ("style", style)] {
            root.set_attribute(name, &value).map_err(|e| dom_err(&e))?;
        }
        container.append_child(&root).map_err(|e| dom_err(&e))?;
        tracing::info!(id = %config.id, "canvas attached");
        Ok(Self { document, root })
    }

    /// The `<svg>` root element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    fn element(&self, id: &str) -> Result<Element, SurfaceError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))
    }
}

impl Surface for DomSurface {
    fn append(&mut self, parent: Option<&str>, tag: &str, id: &str) -> Result<(), SurfaceError> {
        if self.contains(id) {
            return Err(SurfaceError::DuplicateElement(id.to_string()));
        }
        let parent = match parent {
            Some(p) => self.element(p)?,
            None => self.root.clone(),
        };
        let el = self.document.create_element_ns(Some(SVG_NS), tag).map_err(|e| dom_err(&e))?;
        el.set_attribute("id", id).map_err(|e| dom_err(&e))?;
        parent.append_child(&el).map_err(|e| dom_err(&e))?;
        Ok(())
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.element(id)?.set_attribute(name, value).map_err(|e| dom_err(&e))
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool, SurfaceError> {
        match self.document.get_element_by_id(id) {
            Some(el) => {
                el.remove();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }
}

/// A pointer event at `(x, y)` stamped with the browser clock.
#[must_use]
pub fn pointer_event(x: f64, y: f64, kind: PointerKind) -> PointerEvent {
    PointerEvent { pos: Point::new(x, y), kind, time_ms: js_sys::Date::now() }
}
