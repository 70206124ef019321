//! Page and document template assembly.
//!
//! [`PageProcessor`] is the pure per-page pipeline: resolve conflicts, classify
//! survivors and sort them into reading order. [`TemplateBuilder`] collects
//! the resulting pages for one document and wraps them in the metadata the
//! tagging engine expects.

use std::path::Path;

use chrono::{Local, NaiveDate};
use layout_tagger_core::{Element, Error, Region, Result, TaggerConfig, TemplateSettings};
use layout_tagger_resolver::ConflictResolver;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::Classifier;
use crate::sort::sort_reading_order;
use crate::PageTransform;

const STATEMENT_IF: &str = "$if";
const TEMPLATE_VERSION: &str = "1";

/// Page selector of a page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Conditions that must all hold
    #[serde(rename = "$and")]
    pub conditions: Vec<PageCondition>,
}

/// A single page-number condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCondition {
    /// 1-based page number
    #[serde(rename = "$page_num")]
    pub page_num: u32,
}

/// Elements to create on one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTemplate {
    /// `"Page N"`
    pub comment: String,
    /// Elements in reading order
    pub elements: Vec<Element>,
    /// Which page the elements apply to
    pub query: PageQuery,
    /// Always `"$if"`
    pub statement: String,
}

impl PageTemplate {
    /// Wrap already classified and sorted elements for a page.
    pub fn new(page_number: u32, elements: Vec<Element>) -> Result<Self> {
        if page_number == 0 {
            return Err(Error::InvalidPageNumber(page_number));
        }
        Ok(Self {
            comment: format!("Page {page_number}"),
            elements,
            query: PageQuery {
                conditions: vec![PageCondition {
                    page_num: page_number,
                }],
            },
            statement: STATEMENT_IF.to_string(),
        })
    }

    /// Page number this template applies to.
    pub fn page_number(&self) -> Option<u32> {
        self.query.conditions.first().map(|c| c.page_num)
    }
}

/// Runs the per-page pipeline.
///
/// Holds no per-document state, so one processor can serve pages on several
/// threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageProcessor {
    resolver: ConflictResolver,
    classifier: Classifier,
    reading_order_bias: f64,
}

impl Default for PageProcessor {
    fn default() -> Self {
        Self::new(ConflictResolver::new(), &TemplateSettings::default())
    }
}

impl PageProcessor {
    /// Create a processor from a resolver and template settings.
    pub fn new(resolver: ConflictResolver, settings: &TemplateSettings) -> Self {
        Self {
            resolver,
            classifier: Classifier::new(settings.bbox_offset),
            reading_order_bias: settings.reading_order_bias,
        }
    }

    /// Create a processor from a full configuration.
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self::new(
            ConflictResolver::with_strategy(config.resolution.grouping),
            &config.template,
        )
    }

    /// Build the template of one page.
    ///
    /// `page_number` is 1-based.
    pub fn build_page(
        &self,
        regions: &[Region],
        page_number: u32,
        transform: &dyn PageTransform,
    ) -> Result<PageTemplate> {
        if page_number == 0 {
            return Err(Error::InvalidPageNumber(page_number));
        }

        let survivors = self.resolver.resolve_regions(regions);
        debug!(
            "Page {}: {} of {} regions survive resolution",
            page_number,
            survivors.len(),
            regions.len()
        );

        let mut elements = self.classifier.classify_all(&survivors, transform);
        sort_reading_order(&mut elements, self.reading_order_bias);

        PageTemplate::new(page_number, elements)
    }
}

/// Document metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Template author
    pub author: String,
    /// Creation date, `YYYY-MM-DD`
    pub created: String,
    /// Modification date, `YYYY-MM-DD`
    pub modified: String,
    /// Free text describing how the template was made
    pub notes: String,
    /// Version of the tagging SDK the template targets
    pub sdk_version: String,
    /// Template format version
    pub version: String,
}

/// Page-map directive applied to every page.
///
/// Disables the engine's own table, image and word detection so only the
/// created elements shape the structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMapEntry {
    /// Graphic table detection switch
    pub graphic_table_detect: String,
    /// Always `"$if"`
    pub statement: String,
    /// Text table detection switch
    pub text_table_detect: String,
    /// Image label detection switch
    pub label_image_detect: String,
    /// Word label detection switch
    pub label_word_detect: String,
}

impl Default for PageMapEntry {
    fn default() -> Self {
        Self {
            graphic_table_detect: "0".to_string(),
            statement: STATEMENT_IF.to_string(),
            text_table_detect: "0".to_string(),
            label_image_detect: "0".to_string(),
            label_word_detect: "0".to_string(),
        }
    }
}

/// Body of the template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateBody {
    /// One entry per page, in page order
    pub element_create: Vec<PageTemplate>,
    /// Page-map directives
    pub pagemap: Vec<PageMapEntry>,
}

/// Complete layout template for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDocument {
    /// Metadata block
    pub metadata: TemplateMetadata,
    /// Template body
    pub template: TemplateBody,
}

impl TemplateDocument {
    /// Serialize with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty-printed template to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path.as_ref(), json)?;
        info!("Template written to {}", path.as_ref().display());
        Ok(())
    }
}

/// Accumulates page templates for one document.
///
/// Created per document, fed one page at a time, and consumed by
/// [`TemplateBuilder::finish`].
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    processor: PageProcessor,
    author: String,
    sdk_version: String,
    pages: Vec<PageTemplate>,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new(PageProcessor::default(), &TemplateSettings::default())
    }
}

impl TemplateBuilder {
    /// Create an empty builder.
    pub fn new(processor: PageProcessor, settings: &TemplateSettings) -> Self {
        Self {
            processor,
            author: settings.author.clone(),
            sdk_version: settings.sdk_version.clone(),
            pages: Vec::new(),
        }
    }

    /// Create an empty builder from a full configuration.
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self::new(PageProcessor::from_config(config), &config.template)
    }

    /// Processor used by [`TemplateBuilder::process_page`].
    pub fn processor(&self) -> &PageProcessor {
        &self.processor
    }

    /// Build a page and append it.
    pub fn process_page(
        &mut self,
        regions: &[Region],
        page_number: u32,
        transform: &dyn PageTransform,
    ) -> Result<()> {
        let page = self.processor.build_page(regions, page_number, transform)?;
        self.add_page(page);
        Ok(())
    }

    /// Append a page built elsewhere.
    pub fn add_page(&mut self, page: PageTemplate) {
        self.pages.push(page);
    }

    /// Pages collected so far.
    pub fn pages(&self) -> &[PageTemplate] {
        &self.pages
    }

    /// Finish the document dated today.
    pub fn finish(self, zoom: f64) -> TemplateDocument {
        self.finish_on(Local::now().date_naive(), zoom)
    }

    /// Finish the document with an explicit creation date.
    pub fn finish_on(self, date: NaiveDate, zoom: f64) -> TemplateDocument {
        let date = date.format("%Y-%m-%d").to_string();
        let metadata = TemplateMetadata {
            author: self.author,
            created: date.clone(),
            modified: date,
            notes: format!(
                "Created using Docling layout, PDFix SDK and layout-tagger version {} with zoom: {:?}",
                env!("CARGO_PKG_VERSION"),
                zoom
            ),
            sdk_version: self.sdk_version,
            version: TEMPLATE_VERSION.to_string(),
        };

        TemplateDocument {
            metadata,
            template: TemplateBody {
                element_create: self.pages,
                pagemap: vec![PageMapEntry::default()],
            },
        }
    }
}
