//! Subcommand implementations.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use layout_tagger_core::{DetectionDocument, Error, PageDetections, Region, TaggerConfig};
use layout_tagger_template::{
    PageProcessor, PageTemplate, TemplateBuilder, TemplateDocument, ZoomTransform,
};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cli::{Command, TemplateArgs};
use crate::schema::{detections_schema, to_draft07};

/// Counts reported after a template run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSummary {
    /// Pages written
    pub pages: usize,
    /// Regions read from the input
    pub regions: usize,
    /// Regions above the score threshold
    pub accepted: usize,
    /// Elements written across all pages
    pub elements: usize,
}

/// Run a parsed command, writing any stdout output to `out`.
pub fn run(command: &Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Template(args) => {
            let summary = run_template(args)?;
            info!(
                "Wrote {} pages with {} elements ({} of {} regions above threshold)",
                summary.pages, summary.elements, summary.accepted, summary.regions
            );
            Ok(())
        }
        Command::Config { output } => run_config(output.as_deref(), out),
        Command::Schema { draft07 } => run_schema(*draft07, out),
    }
}

/// Configuration for a template run: file (or defaults) plus flag overrides.
pub fn load_config(args: &TemplateArgs) -> Result<TaggerConfig> {
    let mut config = match &args.config {
        Some(path) => TaggerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => TaggerConfig::default(),
    };

    if let Some(zoom) = args.zoom {
        config.rendering.zoom = zoom;
    }
    if let Some(threshold) = args.threshold {
        config.detection.threshold = threshold;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Build a template from a detections file.
pub fn run_template(args: &TemplateArgs) -> Result<TemplateSummary> {
    require_json(&args.input)?;
    require_json(&args.output)?;

    let config = load_config(args)?;
    info!(
        "Processing {} (zoom {}, threshold {})",
        args.input.display(),
        config.rendering.zoom,
        config.detection.threshold
    );

    let document = DetectionDocument::from_file(&args.input)
        .with_context(|| format!("Failed to read detections from {}", args.input.display()))?;

    let (template, summary) = build_template(&document, &config)?;

    template
        .write_to(&args.output)
        .with_context(|| format!("Failed to write template to {}", args.output.display()))?;

    Ok(summary)
}

/// Build the template document for already loaded detections.
///
/// Pages are processed in parallel and collected in input order.
pub fn build_template(
    document: &DetectionDocument,
    config: &TaggerConfig,
) -> Result<(TemplateDocument, TemplateSummary)> {
    let processor = PageProcessor::from_config(config);
    let zoom = config.rendering.zoom;
    let threshold = config.detection.threshold;

    let pages = document
        .pages
        .par_iter()
        .map(|page| build_page(&processor, page, zoom, threshold))
        .collect::<layout_tagger_core::Result<Vec<(PageTemplate, usize)>>>()?;

    let mut summary = TemplateSummary {
        pages: pages.len(),
        regions: document.region_count(),
        accepted: 0,
        elements: 0,
    };

    let mut builder = TemplateBuilder::new(processor, &config.template);
    for (page, accepted) in pages {
        summary.accepted += accepted;
        summary.elements += page.elements.len();
        builder.add_page(page);
    }

    Ok((builder.finish(zoom), summary))
}

fn build_page(
    processor: &PageProcessor,
    page: &PageDetections,
    zoom: f64,
    threshold: f64,
) -> layout_tagger_core::Result<(PageTemplate, usize)> {
    let regions = filter_by_threshold(&page.regions, threshold);
    debug!(
        "Page {}: {} of {} regions above threshold",
        page.page_number,
        regions.len(),
        page.regions.len()
    );

    let transform = ZoomTransform::new(zoom, page.height)?;
    let template = processor.build_page(&regions, page.page_number, &transform)?;
    Ok((template, regions.len()))
}

/// Regions scoring strictly above `threshold`, in order.
pub fn filter_by_threshold(regions: &[Region], threshold: f64) -> Vec<Region> {
    regions
        .iter()
        .filter(|region| region.score > threshold)
        .cloned()
        .collect()
}

/// Print the default configuration or write it to `output`.
pub fn run_config(output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let yaml = TaggerConfig::default().to_yaml()?;
    match output {
        Some(path) => {
            std::fs::write(path, yaml)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            info!("Default configuration written to {}", path.display());
        }
        None => out.write_all(yaml.as_bytes())?,
    }
    Ok(())
}

/// Print the detections JSON Schema.
pub fn run_schema(draft07: bool, out: &mut dyn Write) -> Result<()> {
    let mut schema = detections_schema();
    if draft07 {
        schema = to_draft07(schema);
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}

fn require_json(path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(())
    } else {
        Err(Error::UnsupportedInput {
            path: PathBuf::from(path),
            expected: "JSON".to_string(),
        }
        .into())
    }
}
