//! Paragraph extraction.
//!
//! Captures `<p>` elements plus "content divs": `div`s whose class/id
//! matches the configuration's container patterns, which hold no `<p>`
//! descendants, and which nest at most a handful of inner `div`s.
//! Arbitrary layout containers never become paragraphs; manufacturing
//! paragraphs from them duplicates text already captured elsewhere.

use std::collections::HashSet;

use scraper::ElementRef;

use crate::config::{ContentConfig, MAX_CONTAINER_DIV_DEPTH};
use crate::dom::{element_text, in_chrome_below, matches_any_pattern};

/// Extract paragraphs from `scope` in document order.
///
/// The deduplication tracker lives for this call only, so identical
/// text reappearing in a different scope is always retained there.
#[must_use]
pub fn extract_paragraphs(scope: ElementRef<'_>, config: &ContentConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paragraphs = Vec::new();
    extract_paragraphs_into(scope, config, &mut seen, &mut paragraphs);
    paragraphs
}

/// Extract paragraphs from `scope` into `paragraphs`, sharing the
/// caller's dedupe tracker. The section extractor uses this to give
/// every blocks-of-one-section flush a single section-scoped tracker.
pub(crate) fn extract_paragraphs_into(
    scope: ElementRef<'_>,
    config: &ContentConfig,
    seen: &mut HashSet<String>,
    paragraphs: &mut Vec<String>,
) {
    // When the scope is itself a textual block, it is the unit.
    if scope.value().name() == "p" || is_content_div(scope, config) {
        push_paragraph(element_text(scope), config, seen, paragraphs);
        return;
    }

    // Single pre-order walk keeps output in document order.
    let mut captured_divs = HashSet::new();
    for node in scope.descendants().skip(1) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if in_chrome_below(element, scope) {
            continue;
        }
        match element.value().name() {
            "p" => push_paragraph(element_text(element), config, seen, paragraphs),
            "div" => {
                // Inside a div already emitted as a paragraph?
                let captured_ancestor = element
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|ancestor| captured_divs.contains(&ancestor.id()));
                if captured_ancestor {
                    continue;
                }
                if is_content_div(element, config) {
                    captured_divs.insert(element.id());
                    push_paragraph(element_text(element), config, seen, paragraphs);
                }
            }
            _ => {}
        }
    }
}

fn push_paragraph(
    text: String,
    config: &ContentConfig,
    seen: &mut HashSet<String>,
    paragraphs: &mut Vec<String>,
) {
    if text.chars().count() < config.min_paragraph_length {
        return;
    }
    if config.deduplicate && !seen.insert(text.to_lowercase()) {
        return;
    }
    paragraphs.push(text);
}

/// A `div` counts as a content div when its class/id matches the
/// configured container patterns, it has no `<p>` descendants (those
/// are captured individually), and it is not a deep layout container.
pub(crate) fn is_content_div(element: ElementRef<'_>, config: &ContentConfig) -> bool {
    if element.value().name() != "div" {
        return false;
    }
    if !matches_any_pattern(element, &config.container_patterns) {
        return false;
    }
    let mut nested_divs = 0;
    for descendant in element.descendants().skip(1).filter_map(ElementRef::wrap) {
        match descendant.value().name() {
            "p" => return false,
            "div" => {
                nested_divs += 1;
                if nested_divs > MAX_CONTAINER_DIV_DEPTH {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;
    use crate::config::ContentType;

    fn body(document: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("body").expect("valid selector");
        document.select(&selector).next().expect("body present")
    }

    fn config() -> ContentConfig {
        ContentConfig::new(ContentType::Generic)
            .with_container_patterns(["richtext", "biography"])
    }

    #[test]
    fn test_p_tags_in_document_order() {
        let document = Html::parse_document(
            "<html><body><p>First paragraph text.</p><div><p>Second paragraph text.</p></div></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(
            paragraphs,
            vec!["First paragraph text.", "Second paragraph text."],
        );
    }

    #[test]
    fn test_min_length_filter() {
        let document = Html::parse_document(
            "<html><body><p>ok</p><p>Long enough paragraph.</p></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(paragraphs, vec!["Long enough paragraph."]);
    }

    #[test]
    fn test_content_div_without_p_is_captured() {
        let document = Html::parse_document(
            "<html><body><div class=\"richtext\">Biography text lives in a div.</div></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(paragraphs, vec!["Biography text lives in a div."]);
    }

    #[test]
    fn test_content_div_with_p_yields_only_the_p() {
        let document = Html::parse_document(
            "<html><body><div class=\"richtext\"><p>Paragraph inside the div.</p></div></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(paragraphs, vec!["Paragraph inside the div."]);
    }

    #[test]
    fn test_deep_layout_div_is_not_a_paragraph() {
        let document = Html::parse_document(
            "<html><body><div class=\"richtext\"><div><div><div><div>wrapped text</div></div></div></div></div></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert!(paragraphs.is_empty());
    }

    #[test]
    fn test_captured_div_suppresses_nested_candidates() {
        let document = Html::parse_document(
            "<html><body><div class=\"richtext\"><div class=\"biography\">Shared inner text block.</div></div></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(paragraphs, vec!["Shared inner text block."]);
    }

    #[test]
    fn test_chrome_paragraphs_skipped() {
        let document = Html::parse_document(
            "<html><body><nav><p>Navigation paragraph.</p></nav><p>Actual content paragraph.</p></body></html>",
        );
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(paragraphs, vec!["Actual content paragraph."]);
    }

    #[test]
    fn test_dedupe_is_call_scoped() {
        let html = "<html><body><p>Repeated text block here.</p><p>Repeated text block here.</p></body></html>";
        let document = Html::parse_document(html);
        let deduping = config().with_deduplicate(true);

        let first_call = extract_paragraphs(body(&document), &deduping);
        assert_eq!(first_call, vec!["Repeated text block here."]);

        // A fresh call starts with a fresh tracker
        let second_call = extract_paragraphs(body(&document), &deduping);
        assert_eq!(second_call, first_call);
    }

    #[test]
    fn test_no_dedupe_by_default() {
        let html = "<html><body><p>Repeated text block here.</p><p>Repeated text block here.</p></body></html>";
        let document = Html::parse_document(html);
        let paragraphs = extract_paragraphs(body(&document), &config());
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_scope_is_itself_a_paragraph() {
        let document =
            Html::parse_document("<html><body><p>The scope element itself.</p></body></html>");
        let selector = Selector::parse("p").expect("valid selector");
        let p = document.select(&selector).next().expect("p present");
        assert_eq!(
            extract_paragraphs(p, &config()),
            vec!["The scope element itself."],
        );
    }
}
