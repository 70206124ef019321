//! # layout-tagger-template
//!
//! Layout template assembly for layout-tagger.
//!
//! This crate provides:
//! - The page transform seam between image pixels and page coordinates
//! - Label classification through a fixed taxonomy table
//! - Approximate reading-order sorting
//! - Per-page and per-document template building
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on layout-tagger-core
//! and layout-tagger-resolver, and produces the JSON template consumed by
//! the document-tagging engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod classify;
pub mod sort;
pub mod transform;

// Re-export commonly used types
pub use builder::{
    PageCondition, PageMapEntry, PageProcessor, PageQuery, PageTemplate, TemplateBody,
    TemplateBuilder, TemplateDocument, TemplateMetadata,
};
pub use classify::{descriptor_for, Classifier, Descriptor};
pub use sort::sort_reading_order;
pub use transform::{PageTransform, ZoomTransform};
