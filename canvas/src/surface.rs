//! Drawing surfaces: where shapes put their primitives.
//!
//! A surface is an id-addressed tree of vector primitives mutated through
//! attributes, the way an SVG document is. [`Surface`] is the seam between
//! the canvas and whatever actually displays it; [`SvgSurface`] keeps the
//! tree in memory and serializes it, [`crate::dom::DomSurface`] mirrors it
//! into a live browser document.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::BTreeMap;

use crate::error::SurfaceError;

/// A retained, attribute-addressed vector drawing surface.
pub trait Surface {
    /// Append a new `tag` element with `id` under `parent` (the root when `None`).
    ///
    /// # Errors
    ///
    /// [`SurfaceError::DuplicateElement`] if `id` is taken,
    /// [`SurfaceError::MissingElement`] if `parent` does not exist.
    fn append(&mut self, parent: Option<&str>, tag: &str, id: &str) -> Result<(), SurfaceError>;

    /// Set one attribute on an existing element.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::MissingElement`] if `id` does not exist.
    fn set_attr(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError>;

    /// Replace the text content of an existing element.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::MissingElement`] if `id` does not exist.
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError>;

    /// Remove an element and its descendants. Returns `false` if it was
    /// already absent.
    ///
    /// # Errors
    ///
    /// Only backend failures; a missing element is not an error.
    fn remove(&mut self, id: &str) -> Result<bool, SurfaceError>;

    /// Whether an element with `id` exists.
    fn contains(&self, id: &str) -> bool;

    /// Set several attributes in order.
    ///
    /// # Errors
    ///
    /// See [`Surface::set_attr`].
    fn set_attrs(&mut self, id: &str, attrs: &[(&str, String)]) -> Result<(), SurfaceError> {
        for (name, value) in attrs {
            self.set_attr(id, name, value)?;
        }
        Ok(())
    }

    /// Append the element if it does not exist yet. Returns `true` when it was created.
    ///
    /// # Errors
    ///
    /// See [`Surface::append`].
    fn ensure(&mut self, parent: Option<&str>, tag: &str, id: &str) -> Result<bool, SurfaceError> {
        if self.contains(id) {
            return Ok(false);
        }
        self.append(parent, tag, id)?;
        Ok(true)
    }
}

/// One element of an [`SvgSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub tag: String,
    pub parent: Option<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
}

/// In-memory SVG surface.
///
/// Elements keep insertion order. Attributes are kept sorted by name, so
/// the same state always serializes to the same markup.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    order: Vec<String>,
    elements: BTreeMap<String, SvgElement>,
}

impl SvgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The element with `id`, if present.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&SvgElement> {
        self.elements.get(id)
    }

    /// The attribute set of `id`, if present.
    #[must_use]
    pub fn attrs(&self, id: &str) -> Option<&BTreeMap<String, String>> {
        self.elements.get(id).map(|e| &e.attrs)
    }

    /// One attribute value of `id`.
    #[must_use]
    pub fn attr(&self, id: &str, name: &str) -> Option<&str> {
        self.attrs(id)?.get(name).map(String::as_str)
    }

    /// The text content of `id`.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id)?.text.as_deref()
    }

    /// Ids of the direct children of `parent` (root when `None`), in insertion order.
    #[must_use]
    pub fn children(&self, parent: Option<&str>) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| self.elements.get(id.as_str()).is_some_and(|e| e.parent.as_deref() == parent))
            .map(String::as_str)
            .collect()
    }

    /// Number of elements on the surface.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the whole tree as an SVG document of the given size.
    #[must_use]
    pub fn to_svg(&self, width: &str, height: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            escape(width),
            escape(height)
        ));
        for id in self.children(None) {
            self.write_element(&mut out, id, 1);
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_element(&self, out: &mut String, id: &str, depth: usize) {
        let Some(el) = self.elements.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&el.tag);
        out.push_str(&format!(" id=\"{}\"", escape(id)));
        for (name, value) in &el.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        let children = self.children(Some(id));
        if children.is_empty() && el.text.is_none() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape(text));
        }
        if !children.is_empty() {
            out.push('\n');
            for child in children {
                self.write_element(out, child, depth + 1);
            }
            out.push_str(&indent);
        }
        out.push_str(&format!("</{}>\n", el.tag));
    }

    fn descendants(&self, id: &str) -> Vec<String> {
        let mut found = vec![id.to_string()];
        let mut i = 0;
        while i < found.len() {
            let current = found[i].clone();
            for (child_id, el) in &self.elements {
                if el.parent.as_deref() == Some(current.as_str()) {
                    found.push(child_id.clone());
                }
            }
            i += 1;
        }
        found
    }
}

impl Surface for SvgSurface {
    fn append(&mut self, parent: Option<&str>, tag: &str, id: &str) -> Result<(), SurfaceError> {
        if self.elements.contains_key(id) {
            return Err(SurfaceError::DuplicateElement(id.to_string()));
        }
        if let Some(p) = parent {
            if !self.elements.contains_key(p) {
                return Err(SurfaceError::MissingElement(p.to_string()));
            }
        }
        self.elements.insert(
            id.to_string(),
            SvgElement {
                tag: tag.to_string(),
                parent: parent.map(str::to_string),
                attrs: BTreeMap::new(),
                text: None,
            },
        );
        self.order.push(id.to_string());
        Ok(())
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError> {
        let el = self
            .elements
            .get_mut(id)
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))?;
        el.attrs.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError> {
        let el = self
            .elements
            .get_mut(id)
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))?;
        el.text = Some(text.to_string());
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool, SurfaceError> {
        if !self.elements.contains_key(id) {
            return Ok(false);
        }
        let doomed = self.descendants(id);
        for d in &doomed {
            self.elements.remove(d);
        }
        self.order.retain(|o| !doomed.contains(o));
        Ok(true)
    }

    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
