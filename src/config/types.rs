//! Core configuration types for page segmentation
//!
//! This module contains the main `SegmentConfig` struct that carries the page
//! geometry and the tuning knobs of a segmentation run.

use serde::{Deserialize, Serialize};

use crate::segmenter::BandOverflow;
use crate::utils::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, MIN_IMAGE_AREA};

/// Main configuration struct for segmentation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Width of the browser viewport and of every band image
    pub(crate) viewport_width: u32,

    /// Height of the browser viewport
    ///
    /// **INVARIANT:** Also the band height. The cropping collaborator slices
    /// the full-page raster with the same value, so band `i` of the output
    /// lines up with crop `i`.
    pub(crate) viewport_height: u32,

    /// Area threshold in px² separating IMAGE from ICON for `<svg>` elements
    ///
    /// Default: 800
    pub(crate) min_image_area: f64,

    /// Placement policy for regions below the currently open band
    ///
    /// Default: `Reassign`
    #[serde(default)]
    pub(crate) band_overflow: BandOverflow,

    /// Re-query each region at its center point after dedup
    ///
    /// Scrolls the page as a side effect. Default: false
    #[serde(default)]
    pub(crate) refine_from_point: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            min_image_area: MIN_IMAGE_AREA,
            band_overflow: BandOverflow::default(),
            refine_from_point: false,
        }
    }
}
