//! # layout-tagger
//!
//! Turns layout-detection results into a PDF tagging template.
//!
//! ## Overview
//!
//! - `template`: resolve overlapping detections, classify them and write the
//!   template JSON
//! - `config`: print or write the default YAML configuration
//! - `schema`: print the JSON Schema of the detections input

use std::process::ExitCode;

use clap::Parser;
use layout_tagger::{Cli, Command};
use layout_tagger_core::TaggerConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(&cli.command))),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("layout-tagger v{} starting", env!("CARGO_PKG_VERSION"));

    let mut stdout = std::io::stdout().lock();
    match layout_tagger::run(&cli.command, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log level from the configuration file, if one was given and loads.
fn default_level(command: &Command) -> String {
    match command {
        Command::Template(args) => args
            .config
            .as_ref()
            .and_then(|path| TaggerConfig::from_file(path).ok())
            .unwrap_or_default()
            .logging
            .level,
        _ => TaggerConfig::default().logging.level,
    }
}
