//! Content-type tags, extraction configuration, and input validation.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Minimum number of distinct domain keywords that must occur in a
/// document's text before the keyword-detection tier selects a
/// configuration. Below this, keyword hits are treated as incidental
/// vocabulary.
pub const KEYWORD_MATCH_THRESHOLD: usize = 3;

/// Title used for sections that have no heading of their own.
pub const FALLBACK_SECTION_TITLE: &str = "Content";

/// Heading levels that act as section boundaries in the heading-based
/// strategy.
pub const SECTION_HEADING_LEVELS: [u8; 2] = [2, 3];

/// A `div` with more than this many nested `div`s is a layout container,
/// not a textual block, and never yields a paragraph of its own.
pub const MAX_CONTAINER_DIV_DEPTH: usize = 3;

/// Closed set of page templates the engine can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// Personal page of a researcher (biography, publications, contact).
    #[serde(rename = "researcher_profile")]
    ResearcherProfile,

    /// Digital scholarly edition or manuscript transcription.
    #[serde(rename = "digital_edition")]
    DigitalEdition,

    /// Institute, department, or project presentation page.
    #[serde(rename = "institutional_page")]
    InstitutionalPage,

    /// Anything else; universal fallback.
    #[serde(rename = "generic")]
    Generic,
}

impl ContentType {
    /// Get the string tag for serialized output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResearcherProfile => "researcher_profile",
            Self::DigitalEdition => "digital_edition",
            Self::InstitutionalPage => "institutional_page",
            Self::Generic => "generic",
        }
    }
}

/// Preferred sectioning strategy recorded for a content type.
///
/// This is a preference annotation, not a dispatch switch: the section
/// extractor always runs the full explicit → heading → whole-document
/// cascade in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStrategy {
    /// Semantic section containers are expected to be present.
    Explicit,

    /// Heading elements delimit sections.
    Heading,

    /// Whole document as a single section.
    Fallback,
}

/// Extraction parameters bound to one content type.
///
/// Immutable once constructed; the registry hands out shared references
/// and nothing mutates a config during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// The content type this configuration belongs to.
    pub content_type: ContentType,

    /// Class/id substrings that mark content-bearing containers.
    ///
    /// Listed in priority order: the leading entries are the
    /// type-specific template markers, the trailing entries are
    /// universal fallbacks ("content", "main", ...).
    pub container_patterns: Vec<String>,

    /// Preferred sectioning strategy for this content type.
    pub section_strategy: SectionStrategy,

    /// Suppress repeated paragraphs/list items within one scope.
    pub deduplicate: bool,

    /// Minimum normalized text length for a paragraph to survive.
    pub min_paragraph_length: usize,

    /// Heading-text substrings that never open a section
    /// (navigation, footer, and similar chrome labels).
    pub skip_heading_keywords: Vec<String>,
}

impl ContentConfig {
    /// Create a configuration with neutral defaults.
    #[must_use]
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            container_patterns: Vec::new(),
            section_strategy: SectionStrategy::Heading,
            deduplicate: false,
            min_paragraph_length: 5,
            skip_heading_keywords: Vec::new(),
        }
    }

    /// Set the container patterns.
    #[must_use]
    pub fn with_container_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.container_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preferred section strategy.
    #[must_use]
    pub fn with_section_strategy(mut self, strategy: SectionStrategy) -> Self {
        self.section_strategy = strategy;
        self
    }

    /// Enable or disable scope-local deduplication.
    #[must_use]
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Set the minimum paragraph length.
    #[must_use]
    pub fn with_min_paragraph_length(mut self, length: usize) -> Self {
        self.min_paragraph_length = length;
        self
    }

    /// Set the skip-heading keywords.
    #[must_use]
    pub fn with_skip_heading_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.skip_heading_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// Validate that a source URL is usable for extraction.
///
/// The engine does not fetch the URL; it only needs a well-formed
/// absolute http(s) URL for detection and provenance.
///
/// # Examples
/// ```
/// use pagesift_extractor::config::validate_url;
///
/// assert!(validate_url("https://example.edu/team/jdoe").is_ok());
/// assert!(validate_url("not a url").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<()> {
    let trimmed = url.trim();

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ExtractError::InvalidUrl(url.to_string()));
    }

    // http://a.b is about the shortest URL that can name a host
    if trimmed.len() < 10 {
        return Err(ExtractError::InvalidUrl(url.to_string()));
    }

    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c == '<' || c == '>')
    {
        return Err(ExtractError::InvalidUrl(url.to_string()));
    }

    Ok(())
}
