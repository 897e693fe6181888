//! Extraction engine: the library's entry point.

use scraper::{ElementRef, Html};
use tracing::{debug, info};

use crate::config::validate_url;
use crate::detect::detect;
use crate::error::{ExtractError, Result};
use crate::extract::{extract_contact, extract_sections};
use crate::registry::{create_default_registry, ConfigRegistry};
use crate::types::ExtractionResult;

/// Turns a parsed document and its source URL into structured content.
///
/// Holds only the immutable registry; `extract` takes `&self`, so one
/// engine can serve any number of documents, concurrently if the
/// caller wishes.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    registry: ConfigRegistry,
}

impl ExtractionEngine {
    /// Create an engine with the built-in content types registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: create_default_registry(),
        }
    }

    /// Create an engine with a caller-provided registry.
    #[must_use]
    pub fn with_registry(registry: ConfigRegistry) -> Self {
        Self { registry }
    }

    /// The engine's registry, for inspection or re-registration.
    #[must_use]
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Extract structured content from a parsed document.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidUrl`] when `url` is not an
    /// absolute http(s) URL, and [`ExtractError::UnparsedDocument`]
    /// when the document has no element root. All other
    /// irregularities degrade to smaller results, never errors.
    pub fn extract(&self, document: &Html, url: &str) -> Result<ExtractionResult> {
        validate_url(url)?;
        if document
            .tree
            .root()
            .children()
            .find_map(ElementRef::wrap)
            .is_none()
        {
            return Err(ExtractError::UnparsedDocument(url.to_string()));
        }

        info!(url, "extracting structured content");
        let config = detect(&self.registry, url, document);
        debug!(
            content_type = config.content_type.as_str(),
            "using configuration"
        );

        let sections = extract_sections(document, config);
        let contact = extract_contact(document);

        info!(
            url,
            content_type = config.content_type.as_str(),
            sections = sections.len(),
            "extraction complete"
        );
        Ok(ExtractionResult::new(config.content_type, sections, contact))
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with a one-off default engine.
///
/// # Errors
/// Same contract as [`ExtractionEngine::extract`].
pub fn extract_content(document: &Html, url: &str) -> Result<ExtractionResult> {
    ExtractionEngine::new().extract(document, url)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::ContentType;

    const PROFILE_HTML: &str = "<html><body>\
        <h2>Biography</h2><p>Jane Doe studies medieval manuscripts.</p>\
        <h2>Publications</h2><ul><li>On Carolingian scripts</li></ul>\
        <a href=\"mailto:jane.doe@example.edu\">Email</a>\
        </body></html>";

    #[test]
    fn test_extract_end_to_end() {
        let document = Html::parse_document(PROFILE_HTML);
        let result = extract_content(&document, "https://example.edu/team/jdoe")
            .expect("valid input");

        assert_eq!(result.detected_type, ContentType::ResearcherProfile);
        assert_eq!(result.sections.len(), 2);
        assert_eq!(result.sections[0].title.as_deref(), Some("Biography"));
        assert_eq!(result.sections[1].title.as_deref(), Some("Publications"));
        assert!(result.contact.emails.contains("jane.doe@example.edu"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let document = Html::parse_document(PROFILE_HTML);
        let engine = ExtractionEngine::new();
        let url = "https://example.edu/team/jdoe";

        let first = engine.extract(&document, url).expect("valid input");
        let second = engine.extract(&document, url).expect("valid input");
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let document = Html::parse_document(PROFILE_HTML);
        let result = extract_content(&document, "not-a-url");
        assert!(matches!(result, Err(ExtractError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_document_is_not_an_error() {
        let document = Html::parse_document("<html><body></body></html>");
        let result = extract_content(&document, "https://example.edu/empty")
            .expect("empty documents are valid");
        assert!(result.sections.is_empty());
        assert!(result.contact.is_empty());
    }
}
