pub mod browser_setup;
pub mod config;
pub mod page_extractor;
pub mod segmenter;
pub mod snapshot;
pub mod utils;

pub use config::SegmentConfig;
pub use page_extractor::{capture_snapshot, segment_page};
pub use segmenter::{
    BandOverflow, BandRecord, BoundingBox, Classifier, ElementTree, Label, Region,
    RegionCollection, RegionRecord, SegmentError, SegmentGroups, SegmentResult, Segmenter,
};
pub use snapshot::{DomSnapshot, NodeId, RawNode, SnapshotBuilder};

/// Segment a snapshot's `<body>` with the given configuration
///
/// # Errors
///
/// Fails if the snapshot has no `<body>` or segmentation aborts.
pub fn segment_snapshot(
    snapshot: &DomSnapshot,
    config: SegmentConfig,
) -> SegmentResult<Vec<BandRecord>> {
    let body = snapshot
        .body()
        .ok_or_else(|| SegmentError::Snapshot("document has no <body>".to_string()))?;
    Segmenter::new(config).segment_records(snapshot, &body)
}
