//! Label classification through the element taxonomy table.
//!
//! Every model label maps to one [`Descriptor`] row. The table is data: adding
//! a label means adding a row, not a branch.

use layout_tagger_core::{Element, ElementFlag, ElementType, Label, Region, TextFlag};
use tracing::{debug, warn};

use crate::PageTransform;

const KEEP_WHOLE: &[ElementFlag] = &[ElementFlag::NoJoin, ElementFlag::NoSplit];
const HEADER: &[ElementFlag] = &[
    ElementFlag::Header,
    ElementFlag::Artifact,
    ElementFlag::NoJoin,
    ElementFlag::NoSplit,
];
const FOOTER: &[ElementFlag] = &[
    ElementFlag::Footer,
    ElementFlag::Artifact,
    ElementFlag::NoJoin,
    ElementFlag::NoSplit,
];

/// How regions of one label become template elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Element kind
    pub element_type: ElementType,
    /// Structural role, if any
    pub tag: Option<&'static str>,
    /// Heading level, if any
    pub heading: Option<&'static str>,
    /// Flag tokens, in output order
    pub flags: &'static [ElementFlag],
    /// Text-level hint
    pub text_flag: Option<TextFlag>,
    /// Whether elements of this label reach the output
    pub emit: bool,
}

impl Descriptor {
    const fn text() -> Self {
        Self {
            element_type: ElementType::Text,
            tag: None,
            heading: None,
            flags: KEEP_WHOLE,
            text_flag: Some(TextFlag::NoNewLine),
            emit: true,
        }
    }

    const fn image() -> Self {
        Self {
            element_type: ElementType::Image,
            text_flag: None,
            ..Self::text()
        }
    }

    const fn table() -> Self {
        Self {
            element_type: ElementType::Table,
            text_flag: None,
            ..Self::text()
        }
    }

    const fn tagged(self, tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            ..self
        }
    }

    const fn heading(self, level: &'static str) -> Self {
        Self {
            heading: Some(level),
            ..self
        }
    }

    const fn flagged(self, flags: &'static [ElementFlag]) -> Self {
        Self { flags, ..self }
    }

    const fn hidden(self) -> Self {
        Self {
            emit: false,
            ..self
        }
    }
}

static TAXONOMY: [(Label, Descriptor); 17] = [
    (Label::Caption, Descriptor::text().tagged("Caption")),
    (Label::CheckboxSelected, Descriptor::text()),
    (Label::CheckboxUnselected, Descriptor::text()),
    (Label::Code, Descriptor::text()),
    (Label::DocumentIndex, Descriptor::text()),
    (Label::Footnote, Descriptor::text()),
    (Label::Form, Descriptor::text()),
    (Label::Formula, Descriptor::image().tagged("Formula")),
    (Label::KeyValueRegion, Descriptor::text()),
    (Label::Picture, Descriptor::image()),
    (Label::PageFooter, Descriptor::text().flagged(FOOTER)),
    (Label::PageHeader, Descriptor::text().flagged(HEADER)),
    // List items are recognised but not emitted yet
    (Label::ListItem, Descriptor::text().hidden()),
    (Label::SectionHeader, Descriptor::text().heading("h1")),
    (Label::Table, Descriptor::table()),
    (Label::Text, Descriptor::text()),
    (Label::Title, Descriptor::text().tagged("Title")),
];

static FALLBACK: Descriptor = Descriptor::text();

/// Taxonomy row for a label.
///
/// Labels without a row get the generic text descriptor.
pub fn descriptor_for(label: &Label) -> &'static Descriptor {
    match TAXONOMY.iter().find(|(known, _)| known == label) {
        Some((_, descriptor)) => descriptor,
        None => {
            warn!("No taxonomy entry for label {:?}, classifying as text", label.as_str());
            &FALLBACK
        }
    }
}

/// Turns surviving regions into page-space template elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    bbox_offset: i32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Classifier {
    /// Create a classifier that grows every box by `bbox_offset` pixels per side.
    pub fn new(bbox_offset: i32) -> Self {
        Self { bbox_offset }
    }

    /// Offset applied to every side of a box before mapping.
    pub fn bbox_offset(&self) -> i32 {
        self.bbox_offset
    }

    /// Classify one region.
    ///
    /// Returns `None` for labels whose elements are not emitted.
    pub fn classify(&self, region: &Region, transform: &dyn PageTransform) -> Option<Element> {
        let descriptor = descriptor_for(&region.label);
        if !descriptor.emit {
            debug!("Skipping {} region", region.label);
            return None;
        }

        let device = region.bbox.to_device_rect(self.bbox_offset);
        let page_rect = transform.rect_to_page(&device);
        let bbox = page_rect.to_strings();

        debug!(
            "FROM: {:?} CREATED: {:?}",
            <[f64; 4]>::from(region.bbox),
            bbox
        );

        Some(Element {
            bbox,
            comment: format!(
                "{} {}%",
                region.label.as_str().to_lowercase(),
                region.score_percent()
            ),
            tag: descriptor.tag.map(str::to_string),
            heading: descriptor.heading.map(str::to_string),
            flag: ElementFlag::join(descriptor.flags),
            text_flag: descriptor.text_flag,
            element_type: descriptor.element_type,
            page_rect,
        })
    }

    /// Classify regions in order, dropping the ones that are not emitted.
    pub fn classify_all(&self, regions: &[Region], transform: &dyn PageTransform) -> Vec<Element> {
        regions
            .iter()
            .filter_map(|region| self.classify(region, transform))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_tagger_core::{BBox, DeviceRect, PageRect};

    fn identity(rect: &DeviceRect) -> PageRect {
        PageRect::new(
            f64::from(rect.left),
            f64::from(rect.top),
            f64::from(rect.right),
            f64::from(rect.bottom),
        )
    }

    fn classify(label: &str, score: f64) -> Option<Element> {
        let region = Region::new(BBox::new(10.0, 20.0, 110.0, 70.0), label, score);
        Classifier::default().classify(&region, &identity)
    }

    #[test]
    fn test_every_known_label_has_a_row() {
        for label in Label::KNOWN.iter() {
            assert!(
                TAXONOMY.iter().any(|(known, _)| known == label),
                "missing row for {label}"
            );
        }
    }

    #[test]
    fn test_text_element() {
        let element = classify("Text", 0.9).unwrap();

        assert_eq!(element.element_type, ElementType::Text);
        assert_eq!(element.comment, "text 90%");
        assert_eq!(element.flag, "no_join|no_split");
        assert_eq!(element.text_flag, Some(TextFlag::NoNewLine));
        assert_eq!(element.tag, None);
        assert_eq!(element.bbox, ["8.0", "18.0", "112.0", "72.0"]);
    }

    #[test]
    fn test_page_header_is_artifact() {
        let element = classify("Page-header", 0.75).unwrap();

        assert_eq!(element.element_type, ElementType::Text);
        assert!(element.has_flag(ElementFlag::Header));
        assert!(element.has_flag(ElementFlag::Artifact));
        assert_eq!(element.flag, "header|artifact|no_join|no_split");
    }

    #[test]
    fn test_page_footer_is_artifact() {
        let element = classify("Page-footer", 0.75).unwrap();
        assert_eq!(element.flag, "footer|artifact|no_join|no_split");
    }

    #[test]
    fn test_list_item_not_emitted() {
        assert!(classify("List-item", 0.99).is_none());
    }

    #[test]
    fn test_formula_is_tagged_image() {
        let element = classify("Formula", 0.5).unwrap();

        assert_eq!(element.element_type, ElementType::Image);
        assert_eq!(element.tag.as_deref(), Some("Formula"));
        assert_eq!(element.text_flag, None);
    }

    #[test]
    fn test_table_and_picture() {
        let table = classify("Table", 0.5).unwrap();
        assert_eq!(table.element_type, ElementType::Table);
        assert_eq!(table.text_flag, None);

        let picture = classify("Picture", 0.5).unwrap();
        assert_eq!(picture.element_type, ElementType::Image);
        assert_eq!(picture.tag, None);
    }

    #[test]
    fn test_section_header_heading() {
        let element = classify("Section-header", 0.8).unwrap();
        assert_eq!(element.heading.as_deref(), Some("h1"));
        assert_eq!(element.comment, "section-header 80%");
    }

    #[test]
    fn test_caption_and_title_tags() {
        assert_eq!(classify("Caption", 0.8).unwrap().tag.as_deref(), Some("Caption"));
        assert_eq!(classify("Title", 0.8).unwrap().tag.as_deref(), Some("Title"));
    }

    #[test]
    fn test_unknown_label_falls_back_to_text() {
        let element = classify("Marginalia", 0.42).unwrap();

        assert_eq!(element.element_type, ElementType::Text);
        assert_eq!(element.flag, "no_join|no_split");
        assert_eq!(element.comment, "marginalia 42%");
    }

    #[test]
    fn test_offset_truncates_toward_zero() {
        let region = Region::new(BBox::new(1.5, 0.7, 10.25, 5.99), "Text", 0.5);
        let element = Classifier::new(2).classify(&region, &identity).unwrap();

        // 1.5 - 2 = -0.5 truncates to 0; 10.25 + 2 = 12.25 truncates to 12
        assert_eq!(element.bbox, ["0.0", "-1.0", "12.0", "7.0"]);
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let regions = vec![
            Region::new(BBox::new(0.0, 0.0, 1.0, 1.0), "Title", 0.9),
            Region::new(BBox::new(0.0, 0.0, 1.0, 1.0), "List-item", 0.9),
            Region::new(BBox::new(0.0, 0.0, 1.0, 1.0), "Table", 0.9),
        ];

        let elements = Classifier::default().classify_all(&regions, &identity);
        let comments: Vec<&str> = elements.iter().map(|e| e.comment.as_str()).collect();
        assert_eq!(comments, vec!["title 90%", "table 90%"]);
    }
}
