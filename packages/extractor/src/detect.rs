//! Content-type detection cascade.
//!
//! Four tiers, strictly ordered, first match wins. Explicit signals
//! (URL structure, template markers) outrank keyword frequency, which
//! can false-positive on incidental vocabulary.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::config::{ContentConfig, KEYWORD_MATCH_THRESHOLD};
use crate::dom::class_id_text;
use crate::registry::ConfigRegistry;

/// Select the configuration for a document.
///
/// Never fails: when no registered signal matches, the registry's
/// fallback configuration is returned.
///
/// 1. URL substring match, in registration order.
/// 2. Class/id marker match against the document's elements.
/// 3. Keyword co-occurrence: at least [`KEYWORD_MATCH_THRESHOLD`]
///    distinct keywords present in the document text; the highest
///    distinct count wins, ties go to the earliest registration.
/// 4. Fallback.
#[must_use]
pub fn detect<'r>(registry: &'r ConfigRegistry, url: &str, document: &Html) -> &'r ContentConfig {
    let url_lower = url.to_lowercase();

    for entry in registry.entries() {
        if entry
            .rule
            .url_patterns
            .iter()
            .any(|pattern| url_lower.contains(pattern.as_str()))
        {
            debug!(
                content_type = entry.config.content_type.as_str(),
                "detected by URL pattern"
            );
            return &entry.config;
        }
    }

    let markers = document_markers(document);
    for entry in registry.entries() {
        if entry
            .rule
            .marker_patterns
            .iter()
            .any(|pattern| markers.contains(pattern.as_str()))
        {
            debug!(
                content_type = entry.config.content_type.as_str(),
                "detected by structural marker"
            );
            return &entry.config;
        }
    }

    let text = document_text(document);
    let mut best: Option<(usize, &ContentConfig)> = None;
    for entry in registry.entries() {
        let count = entry
            .rule
            .keywords
            .iter()
            .filter(|keyword| text.contains(keyword.as_str()))
            .count();
        if count >= KEYWORD_MATCH_THRESHOLD
            && best.map_or(true, |(best_count, _)| count > best_count)
        {
            best = Some((count, &entry.config));
        }
    }
    if let Some((count, config)) = best {
        debug!(
            content_type = config.content_type.as_str(),
            distinct_keywords = count,
            "detected by keyword co-occurrence"
        );
        return config;
    }

    debug!("no detection signal matched, using fallback configuration");
    registry.fallback()
}

/// Lowercased class/id text of every element, space-joined.
fn document_markers(document: &Html) -> String {
    let mut markers = String::new();
    for element in document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        markers.push_str(&class_id_text(element));
        markers.push(' ');
    }
    markers
}

/// Lowercased concatenation of the document's text nodes.
fn document_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        if let Some(fragment) = node.value().as_text() {
            text.push_str(fragment);
            text.push(' ');
        }
    }
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentType;
    use crate::registry::create_default_registry;

    fn detect_type(url: &str, html: &str) -> ContentType {
        let registry = create_default_registry();
        let document = Html::parse_document(html);
        detect(&registry, url, &document).content_type
    }

    #[test]
    fn test_url_pattern_wins() {
        assert_eq!(
            detect_type("https://example.edu/team/jdoe", "<html><body></body></html>"),
            ContentType::ResearcherProfile,
        );
        assert_eq!(
            detect_type("https://example.edu/edition/ms-42", "<html><body></body></html>"),
            ContentType::DigitalEdition,
        );
        assert_eq!(
            detect_type("https://example.edu/about", "<html><body></body></html>"),
            ContentType::InstitutionalPage,
        );
    }

    #[test]
    fn test_url_outranks_markers() {
        // Researcher markers in the markup, but the URL says edition
        let html = "<html><body><div class=\"personcard\">x</div></body></html>";
        assert_eq!(
            detect_type("https://example.edu/edition/ms-42", html),
            ContentType::DigitalEdition,
        );
    }

    #[test]
    fn test_marker_match() {
        let html = "<html><body><div class=\"staff-profile\">x</div></body></html>";
        assert_eq!(
            detect_type("https://example.edu/p/42", html),
            ContentType::ResearcherProfile,
        );
    }

    #[test]
    fn test_marker_matches_id_attribute() {
        let html = "<html><body><div id=\"main-content\">x</div></body></html>";
        assert_eq!(
            detect_type("https://example.edu/p/42", html),
            ContentType::InstitutionalPage,
        );
    }

    #[test]
    fn test_keyword_cooccurrence_needs_three() {
        // Two researcher keywords only
        let two = "<html><body><p>Our research team.</p></body></html>";
        assert_eq!(detect_type("https://example.edu/p/42", two), ContentType::Generic);

        // Three distinct keywords
        let three =
            "<html><body><p>Research by professor Doe; publications listed below.</p></body></html>";
        assert_eq!(
            detect_type("https://example.edu/p/42", three),
            ContentType::ResearcherProfile,
        );
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        assert_eq!(
            detect_type("https://example.edu/p/42", "<html><body><p>Hello.</p></body></html>"),
            ContentType::Generic,
        );
    }
}
