//! Error types for segmentation runs
//!
//! Any error aborts the whole run; callers never see partial band output.

use thiserror::Error;

/// Result type alias for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;

#[derive(Debug, Error)]
pub enum SegmentError {
    /// An element reached classification without a parent element
    #[error("Element <{tag}> has no parent element")]
    MissingParent { tag: String },

    /// Rejected configuration value
    #[error("Invalid segmentation config: {0}")]
    InvalidConfig(String),

    /// Snapshot JSON was structurally unusable
    #[error("Malformed DOM snapshot: {0}")]
    Snapshot(String),

    /// Capture script could not be evaluated on the page
    #[error("Browser error: {0}")]
    Browser(String),

    /// JSON encoding/decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
