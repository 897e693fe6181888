//! List extraction.
//!
//! Every `ul`/`ol` in scope yields one item-group from its direct `li`
//! children. Nested sub-lists produce their own group; their text is
//! excluded from the parent item so no line is counted twice.

use std::collections::HashSet;

use scraper::ElementRef;

use crate::config::ContentConfig;
use crate::dom::{in_chrome_below, text_excluding};

const LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// Extract item-groups from `scope` in document order.
///
/// Deduplication, when enabled, applies within a single group only.
#[must_use]
pub fn extract_lists(scope: ElementRef<'_>, config: &ContentConfig) -> Vec<Vec<String>> {
    let mut groups = Vec::new();

    if LIST_TAGS.contains(&scope.value().name()) {
        push_group(scope, config, &mut groups);
    }

    for node in scope.descendants().skip(1) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if !LIST_TAGS.contains(&element.value().name()) {
            continue;
        }
        if in_chrome_below(element, scope) {
            continue;
        }
        push_group(element, config, &mut groups);
    }

    groups
}

fn push_group(list: ElementRef<'_>, config: &ContentConfig, groups: &mut Vec<Vec<String>>) {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for item in list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
    {
        let text = text_excluding(item, &LIST_TAGS);
        if text.is_empty() {
            continue;
        }
        if config.deduplicate && !seen.insert(text.to_lowercase()) {
            continue;
        }
        items.push(text);
    }

    if !items.is_empty() {
        groups.push(items);
    }
}
