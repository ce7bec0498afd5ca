//! Page-side capture of the element tree.
//!
//! This module evaluates the snapshot script on a page the caller has already
//! launched and navigated, and feeds the result to the segmenter.

// Sub-modules
pub mod extractors;
pub mod js_scripts;

// Re-exports for public API
pub use extractors::{capture_snapshot, segment_page};
