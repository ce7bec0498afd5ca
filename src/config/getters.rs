//! Getter methods for `SegmentConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `SegmentConfig` instance.

use super::types::SegmentConfig;
use crate::segmenter::BandOverflow;

impl SegmentConfig {
    #[must_use]
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Band height in document pixels (the viewport height)
    #[must_use]
    pub fn band_height(&self) -> f64 {
        f64::from(self.viewport_height)
    }

    #[must_use]
    pub fn min_image_area(&self) -> f64 {
        self.min_image_area
    }

    #[must_use]
    pub fn band_overflow(&self) -> BandOverflow {
        self.band_overflow
    }

    #[must_use]
    pub fn refine_from_point(&self) -> bool {
        self.refine_from_point
    }
}
