//! Section extraction: the three-tier cascade.
//!
//! Tier 1 looks for explicit semantic containers, tier 2 slices the
//! document at `h2`/`h3` boundaries, tier 3 takes the whole document
//! as one section. Tiers run in that fixed order; the first tier that
//! produces at least one non-empty section wins. A configuration's
//! `section_strategy` records the expected entry tier but never
//! reorders the cascade.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::{ContentConfig, FALLBACK_SECTION_TITLE, SECTION_HEADING_LEVELS};
use crate::dom::{element_text, heading_level, in_chrome_below, matches_any_pattern};
use crate::extract::list::extract_lists;
use crate::extract::paragraph::{extract_paragraphs, extract_paragraphs_into, is_content_div};
use crate::extract::table::extract_tables;
use crate::types::Section;

/// Subtrees never descended into during the heading walk.
const SKIPPED_SUBTREES: [&str; 5] = ["nav", "footer", "aside", "script", "style"];

/// Block elements captured whole during the heading walk.
const BLOCK_TAGS: [&str; 5] = ["p", "ul", "ol", "table", "dl"];

#[allow(clippy::expect_used)]
static SCOPE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main, article, body").expect("valid selector"));

/// Extract the document's sections under `config`.
///
/// Empty sections are dropped and ordinals assigned 0-based over the
/// survivors, whichever tier produced them.
#[must_use]
pub fn extract_sections(document: &Html, config: &ContentConfig) -> Vec<Section> {
    let Some(scope) = document_scope(document) else {
        return Vec::new();
    };

    let mut sections = explicit_sections(scope, config);
    if sections.iter().all(Section::is_empty) {
        debug!("no explicit section containers, trying heading boundaries");
        sections = heading_sections(scope, config);
    }
    if sections.iter().all(Section::is_empty) {
        debug!("no heading boundaries, taking the whole document as one section");
        sections = vec![whole_scope_section(scope, config)];
    }

    sections.retain(|section| !section.is_empty());
    for (ordinal, section) in sections.iter_mut().enumerate() {
        section.ordinal = ordinal;
    }
    debug!(sections = sections.len(), "section extraction finished");
    sections
}

/// The region all tiers operate on: the first of `main`, `article`,
/// `body`, falling back to the document's root element.
fn document_scope(document: &Html) -> Option<ElementRef<'_>> {
    for tag in ["main", "article", "body"] {
        if let Some(scope) = document
            .select(&SCOPE_SELECTOR)
            .find(|element| element.value().name() == tag)
        {
            return Some(scope);
        }
    }
    document
        .tree
        .root()
        .children()
        .find_map(ElementRef::wrap)
}

/// Tier 1: one section per explicit container.
///
/// A container is a `section` element or a `div` matching the
/// configuration's type-specific leading patterns. Containers nested
/// inside an already-emitted container are skipped.
fn explicit_sections(scope: ElementRef<'_>, config: &ContentConfig) -> Vec<Section> {
    let leading = leading_patterns(config);
    let mut emitted = HashSet::new();
    let mut sections = Vec::new();

    for node in scope.descendants().skip(1) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if in_chrome_below(element, scope) {
            continue;
        }
        let is_container = match element.value().name() {
            "section" => true,
            "div" => !leading.is_empty() && matches_any_pattern(element, &leading),
            _ => false,
        };
        if !is_container {
            continue;
        }
        let nested = element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| emitted.contains(&ancestor.id()));
        if nested {
            continue;
        }
        emitted.insert(element.id());

        let mut section = Section::new(Some(container_title(element)));
        section.paragraphs = extract_paragraphs(element, config);
        section.lists = extract_lists(element, config);
        section.tables = extract_tables(element);
        sections.push(section);
    }

    sections
}

/// The type-specific prefix of the container patterns: everything
/// before the first universal pattern ("content"). Universal patterns
/// match half the divs on any page and would turn tier 1 into a
/// whole-page shredder.
fn leading_patterns(config: &ContentConfig) -> Vec<String> {
    config
        .container_patterns
        .iter()
        .take_while(|pattern| pattern.as_str() != "content")
        .cloned()
        .collect()
}

/// Title for an explicit container: its own direct heading, then the
/// parent's, then the grandparent's, then any descendant heading.
fn container_title(container: ElementRef<'_>) -> String {
    if let Some(heading) = direct_child_heading(container) {
        return element_text(heading);
    }
    for ancestor in container.ancestors().filter_map(ElementRef::wrap).take(2) {
        if let Some(heading) = direct_child_heading(ancestor) {
            return element_text(heading);
        }
    }
    if let Some(heading) = container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| heading_level(*element).is_some())
    {
        return element_text(heading);
    }
    FALLBACK_SECTION_TITLE.to_string()
}

fn direct_child_heading(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| matches!(heading_level(*child), Some(level) if level <= 4))
}

/// Blocks accumulated for the section currently being built.
struct OpenSection<'a> {
    title: Option<String>,
    blocks: Vec<ElementRef<'a>>,
}

/// Tier 2: slice the scope at `h2`/`h3` boundaries.
///
/// Explicit-stack pre-order walk; a heading at a level at or above the
/// one that opened the current section closes it. Headings matching
/// the skip keywords do not open a section, so their content attaches
/// to the previous one. Returns nothing when the scope has no boundary
/// headings at all, letting tier 3 run instead.
fn heading_sections(scope: ElementRef<'_>, config: &ContentConfig) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = OpenSection {
        title: None,
        blocks: Vec::new(),
    };
    let mut open_level: Option<u8> = None;
    let mut saw_boundary = false;

    let mut stack: Vec<_> = scope.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let tag = element.value().name();
        if SKIPPED_SUBTREES.contains(&tag) {
            continue;
        }

        if let Some(level) = heading_level(element) {
            if !SECTION_HEADING_LEVELS.contains(&level) {
                continue;
            }
            saw_boundary = true;
            let title = element_text(element);
            if is_skipped_heading(&title, config) {
                continue;
            }
            // A heading deeper than the open section's level is a
            // subsection; its content stays in the open section.
            if open_level.map_or(true, |open| level <= open) {
                flush_section(current, config, &mut sections);
                current = OpenSection {
                    title: Some(title),
                    blocks: Vec::new(),
                };
                open_level = Some(level);
            }
            continue;
        }

        if BLOCK_TAGS.contains(&tag) || is_content_div(element, config) {
            current.blocks.push(element);
            continue;
        }

        let mut children: Vec<_> = node.children().collect();
        children.reverse();
        stack.extend(children);
    }

    flush_section(current, config, &mut sections);

    if !saw_boundary {
        return Vec::new();
    }
    sections
}

fn is_skipped_heading(title: &str, config: &ContentConfig) -> bool {
    let lowered = title.to_lowercase();
    config
        .skip_heading_keywords
        .iter()
        .any(|keyword| lowered.contains(keyword.as_str()))
}

/// Run the primitive extractors over one section's blocks. The dedupe
/// tracker is shared across the section's blocks and nothing else.
fn flush_section(open: OpenSection<'_>, config: &ContentConfig, sections: &mut Vec<Section>) {
    let mut section = Section::new(open.title);
    let mut seen = HashSet::new();

    for block in open.blocks {
        match block.value().name() {
            "p" | "div" => {
                extract_paragraphs_into(block, config, &mut seen, &mut section.paragraphs);
            }
            "ul" | "ol" => section.lists.extend(extract_lists(block, config)),
            "table" | "dl" => section.tables.extend(extract_tables(block)),
            _ => {}
        }
    }

    if !section.is_empty() {
        sections.push(section);
    }
}

/// Tier 3: everything in scope as one titled section.
fn whole_scope_section(scope: ElementRef<'_>, config: &ContentConfig) -> Section {
    let mut section = Section::new(Some(FALLBACK_SECTION_TITLE.to_string()));
    section.paragraphs = extract_paragraphs(scope, config);
    section.lists = extract_lists(scope, config);
    section.tables = extract_tables(scope);
    section
}
