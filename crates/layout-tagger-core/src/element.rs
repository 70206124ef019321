//! Element descriptors consumed by the document-tagging engine.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::PageRect;

/// Kind of page-content element the tagging engine should create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ElementType {
    /// Text-like content
    #[serde(rename = "pde_text")]
    Text,
    /// Image-like content
    #[serde(rename = "pde_image")]
    Image,
    /// Table
    #[serde(rename = "pde_table")]
    Table,
}

impl ElementType {
    /// Get the element type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "pde_text",
            ElementType::Image => "pde_image",
            ElementType::Table => "pde_table",
        }
    }
}

/// Layout hint token carried in an element's `flag` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementFlag {
    /// Page header
    Header,
    /// Page footer
    Footer,
    /// Not part of the logical structure
    Artifact,
    /// Do not join with neighbouring elements
    NoJoin,
    /// Do not split into several elements
    NoSplit,
}

impl ElementFlag {
    /// Token used in the pipe-joined flag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementFlag::Header => "header",
            ElementFlag::Footer => "footer",
            ElementFlag::Artifact => "artifact",
            ElementFlag::NoJoin => "no_join",
            ElementFlag::NoSplit => "no_split",
        }
    }

    /// Join flags into the engine's `a|b|c` form, keeping their order.
    pub fn join(flags: &[ElementFlag]) -> String {
        flags
            .iter()
            .map(ElementFlag::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for ElementFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text-level hint carried in an element's `text_flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TextFlag {
    /// Do not insert a new line inside the element text
    NoNewLine,
}

/// A classified, page-space element of a layout template.
///
/// Field order is the key order the tagging engine has always received.
/// Output only: `page_rect` is not part of the JSON and could not be restored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Page-space bounds as decimal strings: left, bottom, right, top
    pub bbox: [String; 4],
    /// Lower-cased label and rounded score, e.g. `"text 90%"`
    pub comment: String,
    /// Structural role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Heading level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Pipe-joined [`ElementFlag`] tokens
    pub flag: String,
    /// Text-level hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_flag: Option<TextFlag>,
    /// Element kind
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Numeric page-space bounds, kept for ordering
    #[serde(skip)]
    pub page_rect: PageRect,
}

impl Element {
    /// Whether the flag string contains a given token.
    pub fn has_flag(&self, flag: ElementFlag) -> bool {
        self.flag.split('|').any(|token| token == flag.as_str())
    }
}
