//! Command line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Turn layout-detection results into a PDF tagging template.
#[derive(Parser, Debug)]
#[command(name = "layout-tagger", version, about)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a layout template from a detections JSON file
    Template(TemplateArgs),

    /// Print the default configuration, or write it to a file
    Config {
        /// Destination YAML file (prints to stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Print the JSON Schema of the detections input
    Schema {
        /// Emit draft-07 (`definitions`) instead of draft 2020-12
        #[arg(long)]
        draft07: bool,
    },
}

/// Arguments of the `template` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Detections JSON file
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Template JSON file to write
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Zoom the pages were rendered with, in [1, 10]
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Score under which detections are ignored, in [0, 1]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// YAML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}
