//! # layout-tagger-core
//!
//! Core types for layout-tagger.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other layout-tagger crates. It provides:
//!
//! - Geometry types (BBox, DeviceRect, PageRect)
//! - Region and label types produced by the layout-detection model
//! - Element descriptor types consumed by the tagging engine
//! - Configuration and error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other layout-tagger crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod region;

// Re-export commonly used types
pub use config::{
    DetectionSettings, GroupingStrategy, LoggingSettings, RenderingSettings, ResolutionSettings,
    TaggerConfig, TemplateSettings,
};
pub use element::{Element, ElementFlag, ElementType, TextFlag};
pub use error::{Error, Result};
pub use geometry::{BBox, DeviceRect, PageRect};
pub use region::{DetectionDocument, Label, PageDetections, Region};
