//! Regions produced by the layout-detection model.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::BBox;

/// Semantic label assigned to a region by the layout model.
///
/// Labels outside the model's vocabulary are kept verbatim in
/// [`Label::Unknown`] so they can still be reported and classified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// "Caption"
    Caption,
    /// "Checkbox-Selected"
    CheckboxSelected,
    /// "Checkbox-Unselected"
    CheckboxUnselected,
    /// "Code"
    Code,
    /// "Document Index"
    DocumentIndex,
    /// "Footnote"
    Footnote,
    /// "Form"
    Form,
    /// "Formula"
    Formula,
    /// "Key-Value Region"
    KeyValueRegion,
    /// "List-item"
    ListItem,
    /// "Page-footer"
    PageFooter,
    /// "Page-header"
    PageHeader,
    /// "Picture"
    Picture,
    /// "Section-header"
    SectionHeader,
    /// "Table"
    Table,
    /// "Text"
    Text,
    /// "Title"
    Title,
    /// Any label the model vocabulary does not define
    Unknown(String),
}

impl Label {
    /// Every label of the model vocabulary.
    pub const KNOWN: [Label; 17] = [
        Label::Caption,
        Label::CheckboxSelected,
        Label::CheckboxUnselected,
        Label::Code,
        Label::DocumentIndex,
        Label::Footnote,
        Label::Form,
        Label::Formula,
        Label::KeyValueRegion,
        Label::ListItem,
        Label::PageFooter,
        Label::PageHeader,
        Label::Picture,
        Label::SectionHeader,
        Label::Table,
        Label::Text,
        Label::Title,
    ];

    /// Parse a label exactly as the model spells it.
    pub fn parse(name: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Label::Unknown(name.to_string()))
    }

    /// The model's spelling of this label.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Caption => "Caption",
            Label::CheckboxSelected => "Checkbox-Selected",
            Label::CheckboxUnselected => "Checkbox-Unselected",
            Label::Code => "Code",
            Label::DocumentIndex => "Document Index",
            Label::Footnote => "Footnote",
            Label::Form => "Form",
            Label::Formula => "Formula",
            Label::KeyValueRegion => "Key-Value Region",
            Label::ListItem => "List-item",
            Label::PageFooter => "Page-footer",
            Label::PageHeader => "Page-header",
            Label::Picture => "Picture",
            Label::SectionHeader => "Section-header",
            Label::Table => "Table",
            Label::Text => "Text",
            Label::Title => "Title",
            Label::Unknown(name) => name,
        }
    }

    /// Whether the label is part of the model vocabulary.
    pub fn is_known(&self) -> bool {
        !matches!(self, Label::Unknown(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::parse(name)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Label::parse(&name))
    }
}

/// One raw detection: a box, a label and a confidence score.
///
/// Box coordinates are rounded to 2 decimals on construction and on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Region {
    /// Box as `[x_min, y_min, x_max, y_max]` in image pixels
    #[serde(rename = "box", deserialize_with = "deserialize_rounded_box")]
    #[schemars(with = "[f64; 4]")]
    pub bbox: BBox,
    /// Model label
    #[schemars(with = "String")]
    pub label: Label,
    /// Confidence score
    pub score: f64,
}

impl Region {
    /// Create a new region.
    pub fn new(bbox: BBox, label: impl Into<Label>, score: f64) -> Self {
        Self {
            bbox: bbox.rounded(),
            label: label.into(),
            score,
        }
    }

    /// Score as a whole percentage, rounding halves to even.
    pub fn score_percent(&self) -> i64 {
        (self.score * 100.0).round_ties_even() as i64
    }
}

fn deserialize_rounded_box<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BBox, D::Error> {
    BBox::deserialize(deserializer).map(|b| b.rounded())
}

/// Detections for one rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageDetections {
    /// 1-based page number
    pub page_number: u32,
    /// Page width in page-space units
    pub width: f64,
    /// Page height in page-space units
    pub height: f64,
    /// Regions in model output order
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// Detections for a whole document, one entry per page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DetectionDocument {
    /// Pages in document order
    pub pages: Vec<PageDetections>,
}

impl DetectionDocument {
    /// Load a detection document from a JSON file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a detection document from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of regions across all pages.
    pub fn region_count(&self) -> usize {
        self.pages.iter().map(|p| p.regions.len()).sum()
    }
}
