//! Configuration module for page segmentation
//!
//! This module provides the `SegmentConfig` struct and its type-safe builder
//! for configuring segmentation runs with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{SegmentConfigBuilder, WithViewport};
pub use types::SegmentConfig;
