//! Test utilities and helper functions for the segmenter test suite

use kodegen_tools_segmenter::segmenter::{BandRecord, Region, SegmentGroups};
use kodegen_tools_segmenter::{
    DomSnapshot, NodeId, RawNode, SegmentConfig, Segmenter, SnapshotBuilder,
};

/// Route `log` output through the test harness
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A page under construction: `<html>` and `<body>` already in place
pub struct PageFixture {
    pub builder: SnapshotBuilder,
    pub html: NodeId,
    pub body: NodeId,
}

#[allow(dead_code)]
impl PageFixture {
    /// Page of the given document height at the default 1280px width
    pub fn new(height: f64) -> Self {
        let mut builder = SnapshotBuilder::new();
        let html = builder.root(RawNode::element("html").rect(0.0, 0.0, 1280.0, height));
        builder.append(html, RawNode::element("head"));
        let body = builder.append(html, RawNode::element("body").rect(0.0, 0.0, 1280.0, height));
        Self {
            builder,
            html,
            body,
        }
    }

    pub fn add(&mut self, parent: NodeId, node: RawNode) -> NodeId {
        self.builder.append(parent, node)
    }

    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.builder.append_text(parent, text)
    }

    /// Element with a single text child
    pub fn text_element(&mut self, parent: NodeId, node: RawNode, text: &str) -> NodeId {
        let id = self.builder.append(parent, node);
        self.builder.append_text(id, text);
        id
    }

    pub fn build(self) -> (DomSnapshot, NodeId) {
        let body = self.body;
        (self.builder.build().expect("fixture snapshot is valid"), body)
    }
}

/// Run the full pipeline on a fixture's body
#[allow(dead_code)]
pub fn segment(
    snapshot: &DomSnapshot,
    body: NodeId,
    config: SegmentConfig,
) -> SegmentGroups<NodeId> {
    Segmenter::new(config)
        .segment(snapshot, &body)
        .expect("segmentation succeeds")
}

/// All regions across bands, in output order
#[allow(dead_code)]
pub fn flatten(groups: &SegmentGroups<NodeId>) -> Vec<Region<NodeId>> {
    groups.iter().flat_map(|band| band.iter().cloned()).collect()
}

/// `(label code, band-local y)` per band
#[allow(dead_code)]
pub fn summarize(records: &[BandRecord]) -> Vec<Vec<(u8, f64)>> {
    records
        .iter()
        .map(|band| band.iter().map(|r| (r.label, r.bbox.y)).collect())
        .collect()
}
