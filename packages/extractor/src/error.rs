//! Error types for the extraction engine.
//!
//! Only caller-contract violations surface as errors. Malformed markup
//! inside a row, list, or section is skipped locally and never propagates
//! past the extraction boundary.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Source URL is not an absolute http(s) URL.
    #[error("Invalid URL: '{0}'. Expected absolute http(s) URL (e.g., https://example.edu/team/jdoe)")]
    InvalidUrl(String),

    /// Document has no element root.
    #[error("Document for '{0}' has no element root; parse it with Html::parse_document first")]
    UnparsedDocument(String),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let err = ExtractError::InvalidUrl("ftp://example.com".to_string());
        assert!(err.to_string().contains("ftp://example.com"));
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn test_unparsed_document_display() {
        let err = ExtractError::UnparsedDocument("https://example.edu".to_string());
        assert!(err.to_string().contains("https://example.edu"));
    }
}
