//! Shared configuration constants for the segmenter
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default viewport width: 1280px
///
/// Common desktop layout width; most sites render their full desktop
/// navigation at this size.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Default viewport height: 720px
///
/// Also the default band height, so each band matches one screenful.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;

/// Minimum `<svg>` area in px² to count as an IMAGE rather than an ICON
///
/// Roughly a 28×28 glyph. Anything at or below is treated as an icon.
pub const MIN_IMAGE_AREA: f64 = 800.0;
