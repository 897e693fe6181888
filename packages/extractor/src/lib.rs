//! Adaptive structured-content extraction from institutional web pages.
//!
//! Turns a parsed HTML document plus its source URL into an
//! [`ExtractionResult`]: typed sections of paragraphs, lists, and
//! tables, plus page-wide contact information. The engine first
//! detects what kind of page it is looking at (researcher profile,
//! digital edition, institutional page, or generic) and then applies
//! the extraction configuration registered for that type; adding a new
//! content type means registering a configuration and detection rule,
//! not touching any extractor.
//!
//! # Example
//!
//! ```
//! use scraper::Html;
//! use pagesift_extractor::extract_content;
//!
//! let document = Html::parse_document(
//!     "<html><body>\
//!      <h2>Biography</h2><p>Jane Doe studies medieval manuscripts.</p>\
//!      </body></html>",
//! );
//! let result = extract_content(&document, "https://example.edu/team/jdoe")?;
//!
//! assert_eq!(result.sections.len(), 1);
//! assert_eq!(result.sections[0].title.as_deref(), Some("Biography"));
//! # Ok::<(), pagesift_extractor::ExtractError>(())
//! ```

pub mod config;
pub mod detect;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod registry;
pub mod types;

pub use config::{ContentConfig, ContentType, SectionStrategy};
pub use detect::detect;
pub use engine::{extract_content, ExtractionEngine};
pub use error::{ExtractError, Result};
pub use extract::{extract_contact, extract_lists, extract_paragraphs, extract_sections, extract_tables};
pub use registry::{create_default_registry, ConfigRegistry, DetectionRule, RegistryEntry};
pub use types::{ContactInfo, ExtractionResult, Section, Table, TableRow};
