//! # layout-tagger
//!
//! Command line front end for layout-tagger.
//!
//! ## Architecture
//!
//! This is Layer 3 in the architecture - the binary that ties together:
//! - layout-tagger-core: Core types, configuration and errors
//! - layout-tagger-resolver: Overlap detection and conflict resolution
//! - layout-tagger-template: Classification and template assembly
//!
//! The actual binary entry point is in main.rs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod schema;

// Re-export commonly used types
pub use cli::{Cli, Command, TemplateArgs};
pub use commands::{build_template, run, run_template, TemplateSummary};
