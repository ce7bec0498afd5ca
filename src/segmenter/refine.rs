//! Opt-in refinement: re-query the tree at each region's visual center
//!
//! For every region the page is scrolled, in whole-band steps, until the
//! region's top is on screen; the topmost element under the region's center
//! then replaces the region's node, box and label. This is the only part of
//! the pipeline with a side effect on the page (scrolling), so it only runs
//! when enabled in [`SegmentConfig`](crate::config::SegmentConfig).

use log::{debug, warn};

use super::bands::check_band_height;
use super::classifier::Classifier;
use super::element::ElementTree;
use super::errors::SegmentResult;
use super::region::{Region, RegionCollection};

/// Smallest band offset `k * band_height` with `y <= offset + band_height`
///
/// `band_height` must be positive and finite.
fn scroll_offset_for(y: f64, band_height: f64) -> f64 {
    let bands_above = ((y / band_height).ceil() - 1.0).max(0.0);
    bands_above * band_height
}

/// Replace each region with the element found at its center point
///
/// Regions with no element under their center are kept as they are. The
/// region's description is always kept. The tree is scrolled back to the top
/// afterwards.
///
/// # Errors
///
/// Fails for a degenerate `band_height`, or if an element returned by the
/// point query has no parent element.
pub fn refine_from_point<T: ElementTree>(
    tree: &T,
    regions: RegionCollection<T::Node>,
    band_height: f64,
    classifier: &Classifier,
) -> SegmentResult<RegionCollection<T::Node>> {
    check_band_height(band_height)?;

    let mut refined = RegionCollection::new();
    let mut misses = 0usize;

    for region in regions {
        if !region.bbox.y.is_finite() {
            refined.push(region);
            continue;
        }

        let (center_x, center_y) = region.bbox.center();
        let offset = scroll_offset_for(region.bbox.y, band_height);

        if tree.scroll_y() != offset {
            tree.scroll_to(offset);
        }

        match tree.element_from_point(center_x, center_y - offset) {
            Some(node) => {
                let found = Region::from_node(tree, &node, classifier)?;
                refined.push(Region {
                    node: found.node,
                    bbox: found.bbox.translate_y(offset),
                    label: found.label,
                    description: region.description,
                    tag: found.tag,
                });
            }
            None => {
                misses += 1;
                refined.push(region);
            }
        }
    }

    if tree.scroll_y() != 0.0 {
        tree.scroll_to(0.0);
    }

    if misses > 0 {
        warn!("Point refinement found no element for {misses} regions");
    }
    debug!("Refined {} regions from point queries", refined.len() - misses);

    Ok(refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_steps_by_band() {
        assert_eq!(scroll_offset_for(100.0, 720.0), 0.0);
        assert_eq!(scroll_offset_for(720.0, 720.0), 0.0);
        assert_eq!(scroll_offset_for(721.0, 720.0), 720.0);
        assert_eq!(scroll_offset_for(2000.0, 720.0), 1440.0);
        assert_eq!(scroll_offset_for(1440.0, 720.0), 720.0);
        assert_eq!(scroll_offset_for(0.0, 720.0), 0.0);
        assert_eq!(scroll_offset_for(-50.0, 720.0), 0.0);
    }

    #[test]
    fn test_zero_band_height_is_rejected() {
        use crate::segmenter::errors::SegmentError;
        use crate::snapshot::{RawNode, SnapshotBuilder};

        let mut builder = SnapshotBuilder::new();
        let html = builder.root(RawNode::element("html").rect(0.0, 0.0, 100.0, 100.0));
        let snapshot = builder.build().unwrap();
        let regions = RegionCollection::from(vec![Region {
            node: html,
            bbox: snapshot.bounding_box(&html),
            label: crate::segmenter::label::Label::Unknown,
            description: String::new(),
            tag: "html".to_string(),
        }]);

        let result = refine_from_point(&snapshot, regions, 0.0, &Classifier::default());
        assert!(matches!(result, Err(SegmentError::InvalidConfig(_))));
    }
}
