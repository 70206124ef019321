//! # layout-tagger-resolver
//!
//! Region conflict resolution for layout-tagger.
//!
//! This crate provides:
//! - Pairwise overlap detection between detected regions
//! - Connected-component grouping of overlapping regions
//! - Greedy "keep the best, drop its neighbours" resolution per group
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends only on layout-tagger-core
//! and turns a page's raw regions into the regions that get classified.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod grouping;
pub mod overlap;
pub mod resolver;

// Re-export commonly used types
pub use grouping::{group_overlaps, merge_neighbor_sets, union_find_groups, Group};
pub use overlap::OverlapSet;
pub use resolver::{resolve_group, ConflictResolver, Resolution};
