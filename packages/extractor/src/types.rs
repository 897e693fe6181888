//! Value types produced by the extraction engine.
//!
//! Everything here is plain data: owned strings, no DOM references, no
//! lifetimes. A caller can hold an [`ExtractionResult`] long after the
//! parsed document is gone.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ContentType;

/// One label/value pair extracted from a table or definition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Normalized text of the first cell (or the `dt`).
    pub label: String,

    /// Normalized text of the remaining cells (or the `dd`),
    /// space-joined when a row has more than two cells.
    pub value: String,
}

impl TableRow {
    /// Create a row from label and value text.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A row is empty when both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.value.is_empty()
    }
}

/// A table (or definition list) rendered as label/value rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in document order.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table from its rows.
    #[must_use]
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// A table with no rows carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One titled region of the page with its extracted primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title, or `None` for untitled preamble material.
    pub title: Option<String>,

    /// Position among the surviving sections, starting at 0.
    pub ordinal: usize,

    /// Normalized paragraph texts in document order.
    pub paragraphs: Vec<String>,

    /// Item groups, one per source list, items in document order.
    pub lists: Vec<Vec<String>>,

    /// Tables and definition lists in document order.
    pub tables: Vec<Table>,
}

impl Section {
    /// Create an empty section with the given title.
    #[must_use]
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            ordinal: 0,
            paragraphs: Vec::new(),
            lists: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// A section with no paragraphs, no list items, and no table rows
    /// is dropped from the result regardless of its title.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
            && self.lists.iter().all(Vec::is_empty)
            && self.tables.iter().all(Table::is_empty)
    }
}

/// Contact details harvested from the whole page.
///
/// Emails and phones are sets: the same address typically appears in a
/// `mailto:` link, a contact table, and the footer, and callers only
/// care that it was found. Addresses keep their line structure, so they
/// stay an ordered list of line groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Email addresses, deobfuscated, deduplicated, sorted.
    pub emails: BTreeSet<String>,

    /// Phone numbers as written on the page, deduplicated, sorted.
    pub phones: BTreeSet<String>,

    /// Postal addresses, one `Vec<String>` of lines per address.
    pub addresses: Vec<Vec<String>>,
}

impl ContactInfo {
    /// Create an empty contact record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty() && self.addresses.is_empty()
    }
}

/// Complete output of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The content type selected by the detector.
    pub detected_type: ContentType,

    /// Non-empty sections with consecutive ordinals.
    pub sections: Vec<Section>,

    /// Page-wide contact information.
    pub contact: ContactInfo,
}

impl ExtractionResult {
    /// Assemble a result from its parts.
    #[must_use]
    pub fn new(detected_type: ContentType, sections: Vec<Section>, contact: ContactInfo) -> Self {
        Self {
            detected_type,
            sections,
            contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_row_is_empty() {
        assert!(TableRow::new("", "").is_empty());
        assert!(!TableRow::new("Email", "").is_empty());
        assert!(!TableRow::new("", "jdoe@example.edu").is_empty());
    }

    #[test]
    fn test_section_is_empty() {
        let mut section = Section::new(Some("Biography".to_string()));
        assert!(section.is_empty());

        section.lists.push(Vec::new());
        section.tables.push(Table::new(Vec::new()));
        assert!(section.is_empty());

        section.paragraphs.push("Jane Doe studies manuscripts.".to_string());
        assert!(!section.is_empty());
    }

    #[test]
    fn test_contact_info_dedupes_emails() {
        let mut contact = ContactInfo::new();
        contact.emails.insert("jdoe@example.edu".to_string());
        contact.emails.insert("jdoe@example.edu".to_string());
        assert_eq!(contact.emails.len(), 1);
    }

    #[test]
    fn test_extraction_result_serialization() {
        let result = ExtractionResult::new(
            ContentType::Generic,
            vec![Section::new(None)],
            ContactInfo::new(),
        );
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"detected_type\":\"generic\""));
        assert!(json.contains("\"title\":null"));
    }
}
