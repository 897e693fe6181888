//! Table and definition-list extraction.
//!
//! Both markups are rendered uniformly as label/value rows. Rows of a
//! nested inner table belong to the inner table only; the ancestor
//! check below enforces that attribution.

use scraper::ElementRef;

use crate::dom::{element_text, in_chrome_below};
use crate::types::{Table, TableRow};

/// Extract tables, then definition lists, from `scope` in document
/// order within each kind.
#[must_use]
pub fn extract_tables(scope: ElementRef<'_>) -> Vec<Table> {
    let mut tables = Vec::new();

    for table_element in elements_in_scope(scope, "table") {
        let table = table_rows(table_element);
        if !table.is_empty() {
            tables.push(table);
        }
    }

    for dl_element in elements_in_scope(scope, "dl") {
        let table = definition_rows(dl_element);
        if !table.is_empty() {
            tables.push(table);
        }
    }

    tables
}

/// `scope` itself (when it matches) plus matching descendants, in
/// document order, excluding chrome subtrees.
fn elements_in_scope<'a>(scope: ElementRef<'a>, tag: &'a str) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    if scope.value().name() == tag {
        found.push(scope);
    }
    for node in scope.descendants().skip(1) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() == tag && !in_chrome_below(element, scope) {
            found.push(element);
        }
    }
    found
}

fn table_rows(table: ElementRef<'_>) -> Table {
    let mut rows = Vec::new();

    for tr in table
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "tr")
    {
        // Rows of a nested table are that table's rows
        if nearest_ancestor(tr, "table").map(|owner| owner.id()) != Some(table.id()) {
            continue;
        }

        let cells: Vec<String> = tr
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .map(element_text)
            .collect();
        if cells.is_empty() {
            continue;
        }

        let label = cells[0].clone();
        let value = cells[1..]
            .iter()
            .filter(|cell| !cell.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        let row = TableRow::new(label, value);
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Table::new(rows)
}

fn definition_rows(dl: ElementRef<'_>) -> Table {
    let mut labels = Vec::new();
    let mut values = Vec::new();

    for element in dl.descendants().skip(1).filter_map(ElementRef::wrap) {
        if nearest_ancestor(element, "dl").map(|owner| owner.id()) != Some(dl.id()) {
            continue;
        }
        match element.value().name() {
            "dt" => labels.push(element_text(element)),
            "dd" => values.push(element_text(element)),
            _ => {}
        }
    }

    // dt/dd are paired positionally; unmatched leftovers are dropped
    let rows = labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| TableRow::new(label, value))
        .filter(|row| !row.is_empty())
        .collect();

    Table::new(rows)
}

fn nearest_ancestor<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == tag)
}
