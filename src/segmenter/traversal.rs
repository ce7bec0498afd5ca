//! Breadth-first discovery of leaf regions
//!
//! Walks the tree level by level from the root and emits a region for every
//! node that should not be decomposed further. Composite leaves (lists,
//! paragraphs, forms, ...) are emitted *and* descended into, so the output
//! can contain nested, overlapping regions; exact duplicates are removed
//! later by [`RegionCollection::dedup_by_bbox`].

use std::collections::VecDeque;

use log::trace;

use super::classifier::Classifier;
use super::element::{ElementTree, NodeKind, lowercase_tag};
use super::errors::{SegmentError, SegmentResult};
use super::region::{Region, RegionCollection};

/// Never rendered; pruned with their whole subtree
pub const INVISIBLE_TAGS: &[&str] = &[
    "head", "meta", "style", "noscript", "script", "template", "center", "data", "embed", "bdi",
];

/// Inline formatting wrappers; pruned with their whole subtree
pub const SKIPPED_TAGS: &[&str] = &["br", "b", "i", "strong", "em", "legend"];

/// Emitted, then descended into
pub const COMPOSITE_LEAF_TAGS: &[&str] = &[
    "table", "ul", "ol", "dl", "p", "button", "form", "footer", "nav",
];

/// Emitted, never descended into
pub const ATOMIC_LEAF_TAGS: &[&str] = &[
    "svg", "img", "pre", "code", "textarea", "input", "blockquote",
];

#[inline]
fn is_pruned_tag(tag: &str) -> bool {
    INVISIBLE_TAGS.contains(&tag) || SKIPPED_TAGS.contains(&tag)
}

fn is_hidden<T: ElementTree>(tree: &T, node: &T::Node) -> bool {
    tree.computed_style(node).is_hidden() || !tree.check_visibility(node)
}

/// Collect every leaf region under `root`, in breadth-first discovery order
///
/// # Errors
///
/// Fails if a region's source element has no parent element; no partial
/// output is returned.
pub fn collect_leaves<T: ElementTree>(
    tree: &T,
    root: &T::Node,
    classifier: &Classifier,
) -> SegmentResult<RegionCollection<T::Node>> {
    let mut queue = VecDeque::from([root.clone()]);
    let mut leaves = RegionCollection::new();

    while let Some(node) = queue.pop_front() {
        match tree.kind(&node) {
            NodeKind::Text => {
                if tree.has_text(&node) {
                    let parent = tree.parent(&node).ok_or_else(|| SegmentError::MissingParent {
                        tag: "#text".to_string(),
                    })?;
                    leaves.push(Region::from_node(tree, &parent, classifier)?);
                }
                continue;
            }
            NodeKind::Other => continue,
            NodeKind::Element => {}
        }

        let tag = lowercase_tag(tree, &node);

        if is_pruned_tag(&tag) {
            trace!("Pruning <{tag}> subtree");
            continue;
        }

        if is_hidden(tree, &node) {
            trace!("Pruning hidden <{tag}> subtree");
            continue;
        }

        if COMPOSITE_LEAF_TAGS.contains(&tag.as_str()) {
            leaves.push(Region::from_node(tree, &node, classifier)?);
        }

        if ATOMIC_LEAF_TAGS.contains(&tag.as_str()) {
            leaves.push(Region::from_node(tree, &node, classifier)?);
            continue;
        }

        if tree.child_element_count(&node) == 0 {
            if tree.has_text(&node) {
                leaves.push(Region::from_node(tree, &node, classifier)?);
            }
            if tree.computed_style(&node).has_background_url() {
                leaves.push(Region::from_node(tree, &node, classifier)?);
            }
            continue;
        }

        queue.extend(tree.children(&node));
    }

    trace!("Traversal collected {} raw regions", leaves.len());
    Ok(leaves)
}
