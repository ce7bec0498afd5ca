//! Wire format of a captured DOM snapshot
//!
//! The capture script emits the document as a flat, pre-order list of nodes.
//! Each node names its parent by index, so arbitrarily deep documents never
//! hit JSON nesting limits.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::segmenter::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawNodeKind {
    #[default]
    Element,
    Text,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStyle {
    pub visibility: Option<String>,
    pub opacity: Option<f64>,
    pub background_image: Option<String>,
}

/// One node as emitted by the capture script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    /// Index of the parent node; `None` only for the document element
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub kind: RawNodeKind,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub style: RawStyle,
    /// Result of `checkVisibility()`
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// `None` when the page could not introspect listeners
    #[serde(default)]
    pub click_listener: Option<bool>,
    /// Document-space box
    #[serde(default)]
    pub rect: BoundingBox,
    /// Own text for text nodes
    #[serde(default)]
    pub text: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl RawNode {
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            parent: None,
            kind: RawNodeKind::Element,
            tag: Some(tag.into()),
            classes: Vec::new(),
            attributes: HashMap::new(),
            style: RawStyle::default(),
            visible: true,
            click_listener: None,
            rect: BoundingBox::default(),
            text: None,
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: RawNodeKind::Text,
            tag: None,
            text: Some(text.into()),
            ..Self::element("")
        }
    }

    #[must_use]
    pub fn comment() -> Self {
        Self {
            kind: RawNodeKind::Other,
            tag: None,
            ..Self::element("")
        }
    }

    #[must_use]
    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = BoundingBox::new(x, y, width, height);
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn visibility(mut self, value: impl Into<String>) -> Self {
        self.style.visibility = Some(value.into());
        self
    }

    #[must_use]
    pub fn opacity(mut self, value: f64) -> Self {
        self.style.opacity = Some(value);
        self
    }

    #[must_use]
    pub fn background_image(mut self, value: impl Into<String>) -> Self {
        self.style.background_image = Some(value.into());
        self
    }

    /// Mark as failing the host visibility check
    #[must_use]
    pub fn not_rendered(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub fn click_listener(mut self, attached: bool) -> Self {
        self.click_listener = Some(attached);
        self
    }
}

/// Complete capture of one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    /// Pre-order node list; index 0 is the document element
    pub nodes: Vec<RawNode>,
    /// Tag names defined in the page's custom-element registry
    #[serde(default)]
    pub custom_elements: Vec<String>,
}
