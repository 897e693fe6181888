//! Helpers for working with parsed HTML nodes.
//!
//! Small, pure functions over `scraper` element references. All text
//! leaving this module is NFC-normalized with collapsed whitespace, so
//! the extractors can compare and deduplicate strings directly.

use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

/// Tags whose subtrees hold page chrome rather than content.
pub const CHROME_TAGS: [&str; 3] = ["nav", "footer", "aside"];

/// Tags that terminate a visual line inside an element.
const LINE_BREAK_TAGS: [&str; 6] = ["p", "div", "li", "tr", "dd", "dt"];

/// Normalize text: NFC composition, then collapse all whitespace runs
/// (including newlines and tabs) to single spaces and trim the ends.
///
/// # Examples
/// ```
/// use pagesift_extractor::dom::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Jane\n\t Doe  "), "Jane Doe");
/// assert_eq!(normalize_whitespace("\n \t"), "");
/// ```
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of an element's whole subtree.
///
/// # Examples
/// ```
/// use scraper::{Html, Selector};
/// use pagesift_extractor::dom::element_text;
///
/// let doc = Html::parse_fragment("<p>Hello   <b>world</b>!</p>");
/// let selector = Selector::parse("p").unwrap();
/// let p = doc.select(&selector).next().unwrap();
/// assert_eq!(element_text(p), "Hello world!");
/// ```
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Normalized subtree text, skipping any descendant whose tag is in
/// `excluded`. Used to read a list item without the text of its nested
/// sub-lists.
#[must_use]
pub fn text_excluding(element: ElementRef<'_>, excluded: &[&str]) -> String {
    let mut buffer = String::new();
    collect_text_excluding(element, excluded, &mut buffer);
    normalize_whitespace(&buffer)
}

fn collect_text_excluding(element: ElementRef<'_>, excluded: &[&str], buffer: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if excluded.contains(&child_element.value().name()) {
                continue;
            }
            collect_text_excluding(child_element, excluded, buffer);
        } else if let Some(text) = child.value().as_text() {
            buffer.push(' ');
            buffer.push_str(text);
        }
    }
}

/// Subtree text split into visual lines.
///
/// `<br>` and block-level boundaries (`p`, `div`, `li`, `tr`, `dd`,
/// `dt`) start a new line; inline markup does not. Empty lines are
/// dropped. This keeps the line structure of postal addresses intact
/// where [`element_text`] would flatten it.
///
/// # Examples
/// ```
/// use scraper::{Html, Selector};
/// use pagesift_extractor::dom::text_lines;
///
/// let doc = Html::parse_fragment(
///     "<address>Institute of History<br>Example Street 1<br>12345 Sampletown</address>",
/// );
/// let selector = Selector::parse("address").unwrap();
/// let address = doc.select(&selector).next().unwrap();
/// assert_eq!(
///     text_lines(address),
///     vec!["Institute of History", "Example Street 1", "12345 Sampletown"],
/// );
/// ```
#[must_use]
pub fn text_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    collect_lines(element, &mut lines, &mut current);
    flush_line(&mut lines, &mut current);
    lines
}

fn collect_lines(element: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let tag = child_element.value().name();
            if tag == "br" {
                flush_line(lines, current);
            } else if LINE_BREAK_TAGS.contains(&tag) {
                flush_line(lines, current);
                collect_lines(child_element, lines, current);
                flush_line(lines, current);
            } else {
                collect_lines(child_element, lines, current);
            }
        } else if let Some(text) = child.value().as_text() {
            current.push(' ');
            current.push_str(text);
        }
    }
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    let line = normalize_whitespace(current);
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}

/// The element's class attribute values and id, lowercased and joined,
/// for substring matching against marker patterns.
#[must_use]
pub fn class_id_text(element: ElementRef<'_>) -> String {
    let mut haystack = String::new();
    for class in element.value().classes() {
        haystack.push_str(&class.to_lowercase());
        haystack.push(' ');
    }
    if let Some(id) = element.value().attr("id") {
        haystack.push_str(&id.to_lowercase());
    }
    haystack
}

/// True if any pattern occurs as a substring of the element's
/// lowercased class/id text. Patterns are matched case-insensitively.
#[must_use]
pub fn matches_any_pattern(element: ElementRef<'_>, patterns: &[String]) -> bool {
    let haystack = class_id_text(element);
    if haystack.is_empty() {
        return false;
    }
    patterns
        .iter()
        .any(|pattern| haystack.contains(&pattern.to_lowercase()))
}

/// The heading level of `h1`..`h6` elements, `None` for anything else.
#[must_use]
pub fn heading_level(element: ElementRef<'_>) -> Option<u8> {
    match element.value().name() {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// True if a chrome element sits strictly between `element` and `scope`.
///
/// Chrome wrapping the scope itself is the caller's concern; only
/// chrome below the scope hides content from extraction.
pub(crate) fn in_chrome_below(element: ElementRef<'_>, scope: ElementRef<'_>) -> bool {
    for ancestor in element.ancestors().filter_map(ElementRef::wrap) {
        if ancestor.id() == scope.id() {
            return false;
        }
        if CHROME_TAGS.contains(&ancestor.value().name()) {
            return true;
        }
    }
    false
}

/// True if any ancestor element's tag is in `tags`.
#[must_use]
pub fn has_ancestor_tag(element: ElementRef<'_>, tags: &[&str]) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| tags.contains(&ancestor.value().name()))
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn first<'a>(document: &'a Html, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).expect("valid selector");
        document.select(&selector).next().expect("element present")
    }

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("a  b\n\nc\t d"), "a b c d");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_normalize_whitespace_composes_nfc() {
        // "e" + combining acute composes to a single code point
        assert_eq!(normalize_whitespace("re\u{0301}sume\u{0301}"), "r\u{e9}sum\u{e9}");
    }

    #[test]
    fn test_text_excluding_skips_nested_lists() {
        let document = Html::parse_fragment(
            "<li>Medieval manuscripts<ul><li>Carolingian minuscule</li></ul></li>",
        );
        let item = first(&document, "li");
        assert_eq!(text_excluding(item, &["ul", "ol"]), "Medieval manuscripts");
    }

    #[test]
    fn test_text_lines_splits_on_br_and_blocks() {
        let document = Html::parse_document(
            "<html><body><table><tr>\
             <td>Room 204<br>Main Building<div>Example Street 1</div></td>\
             </tr></table></body></html>",
        );
        let cell = first(&document, "td");
        assert_eq!(
            text_lines(cell),
            vec!["Room 204", "Main Building", "Example Street 1"],
        );
    }

    #[test]
    fn test_text_lines_keeps_inline_markup_on_one_line() {
        let document = Html::parse_fragment("<p>Jane <strong>Doe</strong>, PhD</p>");
        let paragraph = first(&document, "p");
        assert_eq!(text_lines(paragraph), vec!["Jane Doe , PhD"]);
    }

    #[test]
    fn test_matches_any_pattern_is_case_insensitive() {
        let document =
            Html::parse_fragment("<div class=\"TeamMember-Card\" id=\"main\">x</div>");
        let div = first(&document, "div");
        assert!(matches_any_pattern(div, &["teammember".to_string()]));
        assert!(matches_any_pattern(div, &["MAIN".to_string()]));
        assert!(!matches_any_pattern(div, &["sidebar".to_string()]));
    }

    #[test]
    fn test_heading_level() {
        let document = Html::parse_fragment("<h3>Publications</h3><p>x</p>");
        assert_eq!(heading_level(first(&document, "h3")), Some(3));
        assert_eq!(heading_level(first(&document, "p")), None);
    }

    #[test]
    fn test_has_ancestor_tag() {
        let document = Html::parse_fragment("<nav><ul><li>Home</li></ul></nav><p>body</p>");
        assert!(has_ancestor_tag(first(&document, "li"), &CHROME_TAGS));
        assert!(!has_ancestor_tag(first(&document, "p"), &CHROME_TAGS));
    }
}
