//! Snapshot capture and segmentation of a live page
//!
//! The page must already be navigated and settled; nothing here launches a
//! browser, navigates, waits, or scrolls the real page.

use chromiumoxide::Page;
use tracing::{debug, info};

use super::js_scripts::SNAPSHOT_SCRIPT;
use crate::config::SegmentConfig;
use crate::segmenter::{BandRecord, SegmentError, SegmentResult, Segmenter};
use crate::snapshot::{DomSnapshot, RawSnapshot};

/// Capture the page's element tree into an owned snapshot
///
/// # Errors
///
/// Returns [`SegmentError::Browser`] if the script cannot be evaluated or its
/// result cannot be read, and [`SegmentError::Snapshot`] if the node list is
/// malformed.
pub async fn capture_snapshot(page: &Page) -> SegmentResult<DomSnapshot> {
    let js_result = page
        .evaluate(SNAPSHOT_SCRIPT)
        .await
        .map_err(|e| SegmentError::Browser(format!("Failed to execute snapshot script: {e}")))?;

    let raw: RawSnapshot = js_result
        .into_value()
        .map_err(|e| SegmentError::Browser(format!("Failed to get snapshot value: {e}")))?;

    debug!(
        "Captured {} nodes, {} custom elements",
        raw.nodes.len(),
        raw.custom_elements.len()
    );

    DomSnapshot::from_raw(raw)
}

/// Capture the page and segment its `<body>` into serialized bands
///
/// The snapshot is a point-in-time copy, so point refinement (when enabled)
/// scrolls the snapshot, not the live page.
///
/// # Errors
///
/// Any capture or segmentation failure aborts the whole run.
pub async fn segment_page(page: &Page, config: &SegmentConfig) -> SegmentResult<Vec<BandRecord>> {
    config
        .validate()
        .map_err(|e| SegmentError::InvalidConfig(format!("{e:#}")))?;

    let snapshot = capture_snapshot(page).await?;
    let body = snapshot
        .body()
        .ok_or_else(|| SegmentError::Snapshot("document has no <body>".to_string()))?;

    let records = Segmenter::new(config.clone()).segment_records(&snapshot, &body)?;

    info!(
        "Segmented page into {} bands ({} regions)",
        records.len(),
        records.iter().map(Vec::len).sum::<usize>()
    );

    Ok(records)
}
