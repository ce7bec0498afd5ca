//! Arena-backed DOM snapshot
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`], so a
//! region's node handle is a plain copyable index that owns nothing.

use std::borrow::Cow;
use std::cell::Cell;
use std::collections::HashSet;

use super::schema::{RawNode, RawNodeKind, RawSnapshot};
use crate::segmenter::{
    BoundingBox, ComputedStyle, ElementTree, NodeKind, SegmentError, SegmentResult,
};

/// Index of a node inside a [`DomSnapshot`]
///
/// Only meaningful for the snapshot that issued it. A handle out of range
/// for a snapshot reads as a detached, childless, non-element node there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotNode {
    pub kind: NodeKind,
    pub tag: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
    pub classes: Vec<String>,
    pub attributes: std::collections::HashMap<String, String>,
    pub style: ComputedStyle,
    pub visible: bool,
    pub click_listener: Option<bool>,
    /// Document-space box
    pub rect: BoundingBox,
    pub text: String,
}

impl SnapshotNode {
    fn detached() -> Self {
        Self {
            kind: NodeKind::Other,
            tag: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
            classes: Vec::new(),
            attributes: std::collections::HashMap::new(),
            style: ComputedStyle::default(),
            visible: false,
            click_listener: None,
            rect: BoundingBox::default(),
            text: String::new(),
        }
    }
}

/// Owned, immutable capture of a rendered document
///
/// The only mutable state is the simulated scroll position used by point
/// queries; boxes are reported relative to it, like `getBoundingClientRect`.
#[derive(Debug, Clone)]
pub struct DomSnapshot {
    nodes: Vec<SnapshotNode>,
    custom_elements: HashSet<String>,
    scroll_y: Cell<f64>,
    /// Stand-in for out-of-range handles
    detached: SnapshotNode,
}

fn node_kind(kind: RawNodeKind) -> NodeKind {
    match kind {
        RawNodeKind::Element => NodeKind::Element,
        RawNodeKind::Text => NodeKind::Text,
        RawNodeKind::Other => NodeKind::Other,
    }
}

impl DomSnapshot {
    /// Parse the capture script's JSON output
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON or a structurally invalid node list.
    pub fn from_json(json: &str) -> SegmentResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// # Errors
    ///
    /// Returns an error for a structurally invalid node list.
    pub fn from_value(value: serde_json::Value) -> SegmentResult<Self> {
        let raw: RawSnapshot = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Build the arena from a pre-order node list
    ///
    /// # Errors
    ///
    /// Fails if the list is empty, if the first node is not a parentless
    /// element, or if any other node names a parent that is missing, not
    /// earlier in the list, or not an element.
    pub fn from_raw(raw: RawSnapshot) -> SegmentResult<Self> {
        let mut nodes: Vec<SnapshotNode> = Vec::with_capacity(raw.nodes.len());

        for (index, node) in raw.nodes.into_iter().enumerate() {
            let id = NodeId(
                u32::try_from(index)
                    .map_err(|_| SegmentError::Snapshot("too many nodes".to_string()))?,
            );

            let (parent, depth) = match (index, node.parent) {
                (0, None) if node.kind == RawNodeKind::Element => (None, 0),
                (0, _) => {
                    return Err(SegmentError::Snapshot(
                        "first node must be a parentless element".to_string(),
                    ));
                }
                (_, None) => {
                    return Err(SegmentError::Snapshot(format!(
                        "node {index} has no parent"
                    )));
                }
                (_, Some(parent)) => {
                    // pre-order: a parent is always already in the arena
                    let parent_node = nodes.get_mut(parent).ok_or_else(|| {
                        SegmentError::Snapshot(format!("node {index} has invalid parent {parent}"))
                    })?;
                    if parent_node.kind != NodeKind::Element {
                        return Err(SegmentError::Snapshot(format!(
                            "node {index} has non-element parent {parent}"
                        )));
                    }
                    parent_node.children.push(id);
                    (Some(NodeId(parent as u32)), parent_node.depth + 1)
                }
            };

            nodes.push(SnapshotNode {
                kind: node_kind(node.kind),
                tag: node.tag,
                parent,
                children: Vec::new(),
                depth,
                classes: node.classes,
                attributes: node.attributes,
                style: ComputedStyle {
                    visibility: node.style.visibility,
                    opacity: node.style.opacity,
                    background_image: node.style.background_image,
                },
                visible: node.visible,
                click_listener: node.click_listener,
                rect: node.rect,
                text: node.text.unwrap_or_default(),
            });
        }

        if nodes.is_empty() {
            return Err(SegmentError::Snapshot("snapshot has no nodes".to_string()));
        }

        Ok(Self {
            nodes,
            custom_elements: raw
                .custom_elements
                .into_iter()
                .map(|tag| tag.to_ascii_lowercase())
                .collect(),
            scroll_y: Cell::new(0.0),
            detached: SnapshotNode::detached(),
        })
    }

    /// The document element (`<html>`)
    #[must_use]
    pub fn document_element(&self) -> NodeId {
        NodeId(0)
    }

    /// The `<body>` element, where segmentation normally starts
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let root = self.get(self.document_element());
        root.children.iter().copied().find(|id| {
            self.get(*id)
                .tag
                .as_deref()
                .is_some_and(|tag| tag.eq_ignore_ascii_case("body"))
        })
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SnapshotNode> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn get(&self, id: NodeId) -> &SnapshotNode {
        self.nodes.get(id.index()).unwrap_or(&self.detached)
    }

    fn is_rendered(&self, node: &SnapshotNode) -> bool {
        node.visible && !node.style.is_hidden()
    }

    /// Visit the subtree under `id` (inclusive) in pre-order until `f` returns true
    fn any_descendant(&self, id: NodeId, mut f: impl FnMut(&SnapshotNode) -> bool) -> bool {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.get(current);
            if f(node) {
                return true;
            }
            stack.extend(node.children.iter().rev().copied());
        }
        false
    }
}

impl ElementTree for DomSnapshot {
    type Node = NodeId;

    fn kind(&self, node: &NodeId) -> NodeKind {
        self.get(*node).kind
    }

    fn tag_name(&self, node: &NodeId) -> Option<Cow<'_, str>> {
        self.get(*node).tag.as_deref().map(Cow::Borrowed)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.get(*node).parent
    }

    fn class_list(&self, node: &NodeId) -> Vec<String> {
        self.get(*node).classes.clone()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.get(*node).classes.iter().any(|c| c == class)
    }

    fn text_content(&self, node: &NodeId) -> Cow<'_, str> {
        let target = self.get(*node);
        if target.kind == NodeKind::Text {
            return Cow::Borrowed(&target.text);
        }
        let mut text = String::new();
        self.any_descendant(*node, |n| {
            if n.kind == NodeKind::Text {
                text.push_str(&n.text);
            }
            false
        });
        Cow::Owned(text)
    }

    fn has_text(&self, node: &NodeId) -> bool {
        self.any_descendant(*node, |n| {
            n.kind == NodeKind::Text && !n.text.trim().is_empty()
        })
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<Cow<'_, str>> {
        self.get(*node)
            .attributes
            .get(name)
            .map(|value| Cow::Borrowed(value.as_str()))
    }

    fn computed_style(&self, node: &NodeId) -> ComputedStyle {
        self.get(*node).style.clone()
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.get(*node).children.clone()
    }

    fn child_element_count(&self, node: &NodeId) -> usize {
        self.get(*node)
            .children
            .iter()
            .filter(|child| self.get(**child).kind == NodeKind::Element)
            .count()
    }

    fn bounding_box(&self, node: &NodeId) -> BoundingBox {
        self.get(*node).rect.translate_y(-self.scroll_y.get())
    }

    fn check_visibility(&self, node: &NodeId) -> bool {
        self.get(*node).visible
    }

    fn has_click_listener(&self, node: &NodeId) -> Option<bool> {
        self.get(*node).click_listener
    }

    fn is_custom_element(&self, tag: &str) -> Option<bool> {
        Some(self.custom_elements.contains(&tag.to_ascii_lowercase()))
    }

    /// Deepest rendered element whose box contains the point; later siblings win ties
    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let doc_y = y + self.scroll_y.get();
        let mut best: Option<(usize, NodeId)> = None;

        for (index, node) in self.nodes.iter().enumerate() {
            if node.kind != NodeKind::Element || node.parent.is_none() {
                continue;
            }
            if !self.is_rendered(node) || !node.rect.contains(x, doc_y) {
                continue;
            }
            if best.is_none_or(|(depth, _)| node.depth >= depth) {
                best = Some((node.depth, NodeId(index as u32)));
            }
        }

        best.map(|(_, id)| id)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y.max(0.0));
    }
}

/// Programmatic construction of a [`DomSnapshot`]
///
/// Nodes must be appended parent-first, which keeps the list in the same
/// pre-order shape the capture script produces.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    raw: RawSnapshot,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the document element
    pub fn root(&mut self, mut node: RawNode) -> NodeId {
        node.parent = None;
        self.push(node)
    }

    pub fn append(&mut self, parent: NodeId, mut node: RawNode) -> NodeId {
        node.parent = Some(parent.index());
        self.push(node)
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, RawNode::text(text))
    }

    /// Register a tag in the custom-element registry
    pub fn define_custom_element(&mut self, tag: impl Into<String>) -> &mut Self {
        self.raw.custom_elements.push(tag.into());
        self
    }

    fn push(&mut self, node: RawNode) -> NodeId {
        self.raw.nodes.push(node);
        NodeId((self.raw.nodes.len() - 1) as u32)
    }

    #[must_use]
    pub fn into_raw(self) -> RawSnapshot {
        self.raw
    }

    /// # Errors
    ///
    /// Same as [`DomSnapshot::from_raw`].
    pub fn build(self) -> SegmentResult<DomSnapshot> {
        DomSnapshot::from_raw(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomSnapshot, NodeId, NodeId, NodeId) {
        let mut builder = SnapshotBuilder::new();
        let html = builder.root(RawNode::element("html").rect(0.0, 0.0, 1280.0, 2000.0));
        let body = builder.append(html, RawNode::element("body").rect(0.0, 0.0, 1280.0, 2000.0));
        let para = builder.append(body, RawNode::element("p").rect(10.0, 900.0, 300.0, 40.0));
        builder.append_text(para, "  Hello ");
        builder.append(body, RawNode::comment());
        let snapshot = builder.build().unwrap();
        (snapshot, html, body, para)
    }

    #[test]
    fn test_structure() {
        let (snapshot, html, body, para) = sample();
        assert_eq!(snapshot.body(), Some(body));
        assert_eq!(snapshot.parent(&body), Some(html));
        assert_eq!(snapshot.parent(&para), Some(body));
        assert_eq!(snapshot.children(&body).len(), 2);
        assert_eq!(snapshot.child_element_count(&body), 1);
        assert_eq!(snapshot.text_content(&body), "  Hello ");
        assert!(snapshot.has_text(&para));
        assert!(snapshot.has_text(&html));
    }

    #[test]
    fn test_point_query_follows_scroll() {
        let (snapshot, _, body, para) = sample();
        assert_eq!(snapshot.element_from_point(20.0, 910.0), Some(para));
        snapshot.scroll_to(720.0);
        assert_eq!(snapshot.element_from_point(20.0, 190.0), Some(para));
        assert_eq!(snapshot.bounding_box(&para).y, 180.0);
        assert_eq!(snapshot.element_from_point(20.0, 10.0), Some(body));
    }

    #[test]
    fn test_rejects_forward_parent() {
        let raw: RawSnapshot = serde_json::from_value(serde_json::json!({
            "nodes": [
                {"tag": "html"},
                {"tag": "body", "parent": 2},
                {"tag": "div", "parent": 1}
            ]
        }))
        .unwrap();
        assert!(matches!(
            DomSnapshot::from_raw(raw),
            Err(SegmentError::Snapshot(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_orphans() {
        assert!(DomSnapshot::from_raw(RawSnapshot::default()).is_err());
        let raw: RawSnapshot = serde_json::from_value(serde_json::json!({
            "nodes": [{"tag": "html"}, {"tag": "body"}]
        }))
        .unwrap();
        assert!(DomSnapshot::from_raw(raw).is_err());
    }

    #[test]
    fn test_custom_registry_is_case_insensitive() {
        let mut builder = SnapshotBuilder::new();
        builder.root(RawNode::element("html"));
        builder.define_custom_element("Relative-Time");
        let snapshot = builder.build().unwrap();
        assert_eq!(snapshot.is_custom_element("relative-time"), Some(true));
        assert_eq!(snapshot.is_custom_element("div"), Some(false));
    }

    #[test]
    fn test_foreign_handle_reads_as_detached() {
        let (_, _, _, para) = sample();
        let mut builder = SnapshotBuilder::new();
        let html = builder.root(RawNode::element("html").rect(0.0, 0.0, 100.0, 100.0));
        let small = builder.build().unwrap();
        assert!(para.index() >= small.len());

        assert_eq!(small.kind(&para), NodeKind::Other);
        assert_eq!(small.tag_name(&para), None);
        assert_eq!(small.parent(&para), None);
        assert!(small.children(&para).is_empty());
        assert!(!small.has_text(&para));
        assert_eq!(small.bounding_box(&para), BoundingBox::default());
        assert_eq!(small.parent(&html), None);
    }
}
