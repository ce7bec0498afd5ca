//! Read-only element tree capability and the per-element facade
//!
//! The segmenter never owns or mutates the page. Everything it needs from a
//! node goes through [`ElementTree`]; the classifier only ever sees the
//! [`ElementFacade`] snapshot assembled from it.

use std::borrow::Cow;

use super::errors::{SegmentError, SegmentResult};
use super::geometry::BoundingBox;

/// DOM node kind as far as the segmenter cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Comments, processing instructions, doctype
    Other,
}

/// Subset of the resolved style the segmenter inspects
///
/// Absent properties are negative signals, never errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    pub visibility: Option<String>,
    pub opacity: Option<f64>,
    pub background_image: Option<String>,
}

impl ComputedStyle {
    /// `visibility: hidden|none` or fully transparent
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self.visibility.as_deref(), Some("hidden" | "none"))
            || self.opacity.is_some_and(|opacity| opacity == 0.0)
    }

    #[must_use]
    pub fn has_background_url(&self) -> bool {
        self.background_image
            .as_deref()
            .is_some_and(|value| value.starts_with("url"))
    }

    /// URL inside `url(...)` with quotes stripped
    #[must_use]
    pub fn background_url(&self) -> Option<Cow<'_, str>> {
        let value = self.background_image.as_deref()?;
        if !value.starts_with("url") {
            return None;
        }
        let inner = value
            .strip_prefix("url(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or_else(|| value.get(4..value.len().saturating_sub(1)).unwrap_or(""));

        if inner.contains(['"', '\'']) {
            Some(Cow::Owned(inner.replace(['"', '\''], "")))
        } else {
            Some(Cow::Borrowed(inner))
        }
    }

    /// Lowercased file extension of the background URL, query and fragment removed
    ///
    /// Inline `data:` URLs yield `"data"`.
    #[must_use]
    pub fn background_extension(&self) -> Option<String> {
        let url = self.background_url()?;
        let url = url.trim();
        if url.get(..5).is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:")) {
            return Some("data".to_string());
        }
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let extension = path.rsplit('.').next().unwrap_or(path);
        Some(extension.to_ascii_lowercase())
    }
}

/// Read-only view of a rendered element tree supplied by the page driver
///
/// `Node` is a cheap handle with no ownership of the underlying node; it is
/// only valid for the duration of one segmentation run.
///
/// The methods with default bodies are best-effort capabilities. Hosts that
/// cannot answer them keep the defaults, which degrade to a deterministic
/// negative result.
pub trait ElementTree {
    type Node: Clone;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// Tag name of an element, `None` for non-elements
    fn tag_name(&self, node: &Self::Node) -> Option<Cow<'_, str>>;

    /// Parent element
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn class_list(&self, node: &Self::Node) -> Vec<String>;

    /// Concatenated text of the node and its descendants
    fn text_content(&self, node: &Self::Node) -> Cow<'_, str>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<Cow<'_, str>>;

    fn computed_style(&self, node: &Self::Node) -> ComputedStyle;

    /// Direct children in document order, text nodes included
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Viewport-relative box
    fn bounding_box(&self, node: &Self::Node) -> BoundingBox;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.class_list(node).iter().any(|c| c == class)
    }

    fn has_text(&self, node: &Self::Node) -> bool {
        !self.text_content(node).trim().is_empty()
    }

    fn child_element_count(&self, node: &Self::Node) -> usize {
        self.children(node)
            .iter()
            .filter(|child| self.kind(child) == NodeKind::Element)
            .count()
    }

    /// Host visibility check (e.g. `Element.checkVisibility()`)
    fn check_visibility(&self, _node: &Self::Node) -> bool {
        true
    }

    /// `Some(true)` when a click listener is attached; `None` if the host can't tell
    fn has_click_listener(&self, _node: &Self::Node) -> Option<bool> {
        None
    }

    /// Custom-element registry lookup; `None` if the host has no registry
    fn is_custom_element(&self, _tag: &str) -> Option<bool> {
        None
    }

    /// Topmost element at a viewport point
    fn element_from_point(&self, _x: f64, _y: f64) -> Option<Self::Node> {
        None
    }

    fn scroll_y(&self) -> f64 {
        0.0
    }

    fn scroll_to(&self, _y: f64) {}
}

/// Classification-relevant snapshot of a single element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFacade {
    /// Lowercase tag name
    pub tag_name: String,
    /// Lowercase tag name of the parent element
    pub parent_tag_name: String,
    pub classes: Vec<String>,
    pub has_text: bool,
    pub bbox: BoundingBox,
    pub style: ComputedStyle,
    pub role: Option<String>,
    pub input_type: Option<String>,
    pub has_click_listener: bool,
    pub is_custom_element: bool,
}

impl ElementFacade {
    /// Gather everything the classifier needs from `node`
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::MissingParent`] if the element has no parent.
    pub fn inspect<T: ElementTree>(tree: &T, node: &T::Node) -> SegmentResult<Self> {
        let tag_name = lowercase_tag(tree, node);
        let parent = tree.parent(node).ok_or_else(|| SegmentError::MissingParent {
            tag: tag_name.clone(),
        })?;
        let parent_tag_name = lowercase_tag(tree, &parent);

        let is_custom_element = tree.is_custom_element(&tag_name).unwrap_or(false);

        Ok(Self {
            parent_tag_name,
            classes: tree.class_list(node),
            has_text: tree.has_text(node),
            bbox: tree.bounding_box(node),
            style: tree.computed_style(node),
            role: non_empty_attribute(tree, node, "role"),
            input_type: non_empty_attribute(tree, node, "type"),
            has_click_listener: tree.has_click_listener(node).unwrap_or(false),
            is_custom_element,
            tag_name,
        })
    }

    #[inline]
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[inline]
    #[must_use]
    pub fn is_tag(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag_name.as_str())
    }

    #[inline]
    #[must_use]
    pub fn is_parent_tag(&self, tags: &[&str]) -> bool {
        tags.contains(&self.parent_tag_name.as_str())
    }
}

/// First non-empty of `aria-label`, `alt`, `role`
pub fn describe<T: ElementTree>(tree: &T, node: &T::Node) -> String {
    ["aria-label", "alt", "role"]
        .iter()
        .find_map(|name| non_empty_attribute(tree, node, name))
        .unwrap_or_default()
}

pub(crate) fn lowercase_tag<T: ElementTree>(tree: &T, node: &T::Node) -> String {
    tree.tag_name(node)
        .map(|tag| tag.to_ascii_lowercase())
        .unwrap_or_default()
}

fn non_empty_attribute<T: ElementTree>(tree: &T, node: &T::Node, name: &str) -> Option<String> {
    tree.attribute(node, name)
        .filter(|value| !value.is_empty())
        .map(Cow::into_owned)
}
