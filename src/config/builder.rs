//! Type-safe builder for `SegmentConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that the viewport geometry is set before building a `SegmentConfig`.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;

use super::types::SegmentConfig;
use crate::segmenter::BandOverflow;
use crate::utils::MIN_IMAGE_AREA;

// Type states for the builder
pub struct WithViewport;

pub struct SegmentConfigBuilder<State = ()> {
    pub(crate) viewport_width: Option<u32>,
    pub(crate) viewport_height: Option<u32>,
    pub(crate) min_image_area: f64,
    pub(crate) band_overflow: BandOverflow,
    pub(crate) refine_from_point: bool,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for SegmentConfigBuilder<()> {
    fn default() -> Self {
        Self {
            viewport_width: None,
            viewport_height: None,
            min_image_area: MIN_IMAGE_AREA,
            band_overflow: BandOverflow::default(),
            refine_from_point: false,
            _phantom: PhantomData,
        }
    }
}

impl SegmentConfig {
    /// Create a builder for configuring a `SegmentConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SegmentConfigBuilder<()> {
        SegmentConfigBuilder::default()
    }

    /// Check invariants of a config that did not come through the builder
    ///
    /// # Errors
    ///
    /// Returns an error for a zero viewport dimension or a non-positive
    /// `min_image_area`.
    pub fn validate(&self) -> Result<()> {
        validate_geometry(self.viewport_width, self.viewport_height, self.min_image_area)
    }
}

fn validate_geometry(width: u32, height: u32, min_image_area: f64) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(anyhow!(
            "viewport dimensions must be positive, got {width}x{height}"
        ));
    }
    if !min_image_area.is_finite() || min_image_area <= 0.0 {
        return Err(anyhow!(
            "min_image_area must be a positive number, got {min_image_area}"
        ));
    }
    Ok(())
}

impl SegmentConfigBuilder<()> {
    /// Set the viewport size; `height` doubles as the band height
    pub fn viewport(self, width: u32, height: u32) -> SegmentConfigBuilder<WithViewport> {
        SegmentConfigBuilder {
            viewport_width: Some(width),
            viewport_height: Some(height),
            min_image_area: self.min_image_area,
            band_overflow: self.band_overflow,
            refine_from_point: self.refine_from_point,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the viewport is set
impl SegmentConfigBuilder<WithViewport> {
    pub fn build(self) -> Result<SegmentConfig> {
        let viewport_width = self
            .viewport_width
            .ok_or_else(|| anyhow!("viewport_width is required"))?;
        let viewport_height = self
            .viewport_height
            .ok_or_else(|| anyhow!("viewport_height is required"))?;

        validate_geometry(viewport_width, viewport_height, self.min_image_area)?;

        if self.refine_from_point {
            log::debug!("Point refinement enabled; segmentation will scroll the page");
        }

        Ok(SegmentConfig {
            viewport_width,
            viewport_height,
            min_image_area: self.min_image_area,
            band_overflow: self.band_overflow,
            refine_from_point: self.refine_from_point,
        })
    }
}
