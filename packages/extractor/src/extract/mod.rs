//! Extraction primitives and the section orchestrator.
//!
//! The paragraph, list, and table extractors each take one scope
//! element and return plain data. The section extractor composes them
//! across the three-tier sectioning cascade; the contact extractor is
//! a page-wide pass independent of sectioning.

pub mod contact;
pub mod list;
pub mod paragraph;
pub mod section;
pub mod table;

pub use contact::extract_contact;
pub use list::extract_lists;
pub use paragraph::extract_paragraphs;
pub use section::extract_sections;
pub use table::extract_tables;
