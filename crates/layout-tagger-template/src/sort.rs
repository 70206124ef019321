//! Approximate reading order.

use std::cmp::Ordering;

use layout_tagger_core::Element;

/// Sort elements top to bottom, then left to right.
///
/// The key is `(bottom, bias - left)` on the page-space rectangle, compared
/// descending. `bias` should exceed every left coordinate on the page. The sort
/// is stable: elements with equal keys keep their incoming order.
pub fn sort_reading_order(elements: &mut [Element], bias: f64) {
    elements.sort_by(|a, b| {
        let (a_v, a_h) = (a.page_rect.bottom, bias - a.page_rect.left);
        let (b_v, b_h) = (b.page_rect.bottom, bias - b.page_rect.left);
        b_v.partial_cmp(&a_v)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b_h.partial_cmp(&a_h).unwrap_or(Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_tagger_core::{ElementType, PageRect};

    fn element(comment: &str, left: f64, bottom: f64) -> Element {
        let page_rect = PageRect::new(left, bottom, left + 10.0, bottom + 10.0);
        Element {
            bbox: page_rect.to_strings(),
            comment: comment.to_string(),
            tag: None,
            heading: None,
            flag: String::new(),
            text_flag: None,
            element_type: ElementType::Text,
            page_rect,
        }
    }

    fn comments(elements: &[Element]) -> Vec<&str> {
        elements.iter().map(|e| e.comment.as_str()).collect()
    }

    #[test]
    fn test_higher_elements_first() {
        let mut elements = vec![
            element("bottom", 50.0, 100.0),
            element("top", 50.0, 700.0),
            element("middle", 50.0, 400.0),
        ];

        sort_reading_order(&mut elements, 1000.0);
        assert_eq!(comments(&elements), vec!["top", "middle", "bottom"]);
    }

    #[test]
    fn test_same_line_left_to_right() {
        let mut elements = vec![
            element("right", 300.0, 500.0),
            element("left", 20.0, 500.0),
            element("center", 150.0, 500.0),
        ];

        sort_reading_order(&mut elements, 1000.0);
        assert_eq!(comments(&elements), vec!["left", "center", "right"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut elements = vec![
            element("first", 10.0, 10.0),
            element("second", 10.0, 10.0),
            element("third", 10.0, 10.0),
        ];

        sort_reading_order(&mut elements, 1000.0);
        assert_eq!(comments(&elements), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_slice() {
        let mut elements: Vec<Element> = Vec::new();
        sort_reading_order(&mut elements, 1000.0);
        assert!(elements.is_empty());
    }
}
