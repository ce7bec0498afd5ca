//! Owned DOM snapshots
//!
//! A snapshot is a point-in-time copy of a rendered document, taken by
//! [`SNAPSHOT_SCRIPT`](crate::page_extractor::js_scripts::SNAPSHOT_SCRIPT) or
//! assembled with [`SnapshotBuilder`]. It implements
//! [`ElementTree`](crate::segmenter::ElementTree), point queries and scrolling
//! included, so the whole pipeline can run without a live page.

pub mod arena;
pub mod schema;

pub use arena::{DomSnapshot, NodeId, SnapshotBuilder, SnapshotNode};
pub use schema::{RawNode, RawNodeKind, RawSnapshot, RawStyle};
