//! Segmentation and classification engine
//!
//! Pipeline for one run:
//!
//! ```text
//! collect_leaves -> dedup_by_bbox -> [refine_from_point] -> sort_by_y -> partition -> serialize
//! ```
//!
//! Everything here is synchronous and reads the tree through [`ElementTree`]
//! only. The optional refinement pass is the single step allowed to scroll.

pub mod bands;
pub mod classifier;
pub mod element;
pub mod errors;
pub mod geometry;
pub mod label;
pub mod refine;
pub mod region;
pub mod serialize;
pub mod traversal;

pub use bands::{BandOverflow, SegmentGroups, check_band_height, partition};
pub use classifier::{Classifier, RULES, Rule};
pub use element::{ComputedStyle, ElementFacade, ElementTree, NodeKind, describe};
pub use errors::{SegmentError, SegmentResult};
pub use geometry::BoundingBox;
pub use label::{Label, PALETTE};
pub use refine::refine_from_point;
pub use region::{Region, RegionCollection};
pub use serialize::{BandRecord, RegionRecord};
pub use traversal::collect_leaves;

use log::debug;

use crate::config::SegmentConfig;

/// Runs the full pipeline with a fixed configuration
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentConfig,
    classifier: Classifier,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmentConfig::default())
    }
}

impl Segmenter {
    #[must_use]
    pub fn new(config: SegmentConfig) -> Self {
        let classifier = Classifier::new(config.min_image_area());
        Self { config, classifier }
    }

    #[must_use]
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Segment the subtree under `root` into bands of labeled regions
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidConfig`] before touching the tree when
    /// the configuration is invalid (a deserialized config may skip the
    /// builder). Any other fault aborts the run; no partial bands are returned.
    pub fn segment<T: ElementTree>(
        &self,
        tree: &T,
        root: &T::Node,
    ) -> SegmentResult<SegmentGroups<T::Node>> {
        self.config
            .validate()
            .map_err(|e| SegmentError::InvalidConfig(format!("{e:#}")))?;
        let band_height = self.config.band_height();

        let leaves = collect_leaves(tree, root, &self.classifier)?;
        let raw_count = leaves.len();

        let mut unique = leaves.dedup_by_bbox();
        debug!(
            "Collected {raw_count} leaf regions, {} after dedup",
            unique.len()
        );

        if self.config.refine_from_point() {
            unique = refine_from_point(tree, unique, band_height, &self.classifier)?;
        }

        let groups = partition(unique.sort_by_y(), band_height, self.config.band_overflow())?;
        debug!(
            "Partitioned {} regions into {} bands of {band_height}px",
            groups.region_count(),
            groups.len()
        );

        Ok(groups)
    }

    /// [`segment`](Self::segment) followed by serialization
    ///
    /// # Errors
    ///
    /// Same as [`segment`](Self::segment).
    pub fn segment_records<T: ElementTree>(
        &self,
        tree: &T,
        root: &T::Node,
    ) -> SegmentResult<Vec<BandRecord>> {
        Ok(self.segment(tree, root)?.serialize())
    }
}
