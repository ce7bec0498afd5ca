//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use super::builder::SegmentConfigBuilder;
use crate::segmenter::BandOverflow;

impl<State> SegmentConfigBuilder<State> {
    /// Area threshold in px² between IMAGE and ICON for `<svg>` elements
    #[must_use]
    pub fn min_image_area(mut self, area: f64) -> Self {
        self.min_image_area = area;
        self
    }

    /// How a region below the open band is handled during partitioning
    ///
    /// `BandOverflow::Reassign` (default) places every region in the band
    /// containing its top edge. `BandOverflow::Drop` keeps the single-pass
    /// behavior where the region that closes a band is discarded.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use kodegen_tools_segmenter::config::SegmentConfig;
    /// # use kodegen_tools_segmenter::segmenter::BandOverflow;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = SegmentConfig::builder()
    ///     .viewport(1280, 720)
    ///     .band_overflow(BandOverflow::Drop)
    ///     .build()?;
    /// assert_eq!(config.band_overflow(), BandOverflow::Drop);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn band_overflow(mut self, overflow: BandOverflow) -> Self {
        self.band_overflow = overflow;
        self
    }

    /// Re-query every region at its center point after dedup
    ///
    /// Off by default. When enabled the tree is scrolled in band-sized steps
    /// while refining and scrolled back to the top afterwards.
    #[must_use]
    pub fn refine_from_point(mut self, enabled: bool) -> Self {
        self.refine_from_point = enabled;
        self
    }
}
