//! Page-wide contact extraction.
//!
//! Runs over the whole document, independent of sectioning: contact
//! details live in headers, sidebars and contact tables that the
//! section cascade may never visit. Sources, in order: labeled
//! table/definition-list rows, `mailto:`/`tel:` links, `<address>`
//! elements, and finally regex scans over the visible text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::dom::{element_text, has_ancestor_tag, text_lines, CHROME_TAGS};
use crate::types::ContactInfo;

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

/// "name AT domain DOT tld" and bracketed/parenthesized variants.
#[allow(clippy::expect_used)]
static OBFUSCATED_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([a-z0-9._%+-]+)\s*(?:\[at\]|\(at\)|\bat\b)\s*((?:[a-z0-9-]+\s*(?:\[dot\]|\(dot\)|\bdot\b|\.)\s*)+[a-z]{2,})\b",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)]
static DOT_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:\[dot\]|\(dot\)|\bdot\b|\.)\s*").expect("valid regex")
});

/// Conservative international phone pattern: +CC then 2-4 digit groups.
#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+\d{1,3}(?:[ ./-]?\d{2,4}){2,4}").expect("valid regex")
});

/// Label categories a table/definition-list row can fall into.
enum ContactKind {
    Email,
    Phone,
    Address,
}

/// Collect contact details from the whole document.
#[must_use]
pub fn extract_contact(document: &Html) -> ContactInfo {
    let mut contact = ContactInfo::new();
    let Some(root) = document.tree.root().children().find_map(ElementRef::wrap) else {
        return contact;
    };
    let mut seen_addresses = HashSet::new();

    labeled_rows(root, &mut contact, &mut seen_addresses);
    scheme_links(root, &mut contact);
    attribute_emails(root, &mut contact);
    address_elements(root, &mut contact, &mut seen_addresses);
    text_patterns(root, &mut contact);

    debug!(
        emails = contact.emails.len(),
        phones = contact.phones.len(),
        addresses = contact.addresses.len(),
        "contact extraction finished"
    );
    contact
}

/// Table rows and `dt`/`dd` pairs whose label names a contact field.
fn labeled_rows(
    root: ElementRef<'_>,
    contact: &mut ContactInfo,
    seen_addresses: &mut HashSet<String>,
) {
    for element in root.descendants().filter_map(ElementRef::wrap) {
        if has_ancestor_tag(element, &CHROME_TAGS) {
            continue;
        }
        match element.value().name() {
            "tr" => {
                let cells: Vec<ElementRef<'_>> = element
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                    .collect();
                if cells.len() < 2 {
                    continue;
                }
                let label = element_text(cells[0]);
                if let Some(kind) = classify_label(&label) {
                    take_value(kind, cells[1], contact, seen_addresses);
                }
            }
            "dl" => {
                let mut labels = Vec::new();
                let mut values = Vec::new();
                for child in element.descendants().skip(1).filter_map(ElementRef::wrap) {
                    match child.value().name() {
                        "dt" => labels.push(child),
                        "dd" => values.push(child),
                        _ => {}
                    }
                }
                for (dt, dd) in labels.into_iter().zip(values) {
                    if let Some(kind) = classify_label(&element_text(dt)) {
                        take_value(kind, dd, contact, seen_addresses);
                    }
                }
            }
            _ => {}
        }
    }
}

fn classify_label(label: &str) -> Option<ContactKind> {
    let lowered = label.to_lowercase();
    let matches_any = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));

    if matches_any(&["email", "e-mail"]) {
        Some(ContactKind::Email)
    } else if matches_any(&["phone", "tel"]) {
        Some(ContactKind::Phone)
    } else if matches_any(&[
        "address",
        "adresse",
        "kontakt",
        "room",
        "raum",
        "office",
        "b\u{fc}ro",
    ]) {
        // Generic "Kontakt" rows are treated as addresses: the line
        // structure is worth keeping and emails/phones in the value
        // are still picked up by the text-level scans.
        Some(ContactKind::Address)
    } else {
        None
    }
}

fn take_value(
    kind: ContactKind,
    cell: ElementRef<'_>,
    contact: &mut ContactInfo,
    seen_addresses: &mut HashSet<String>,
) {
    match kind {
        ContactKind::Email => {
            let email = scheme_value(cell, "mailto:")
                .unwrap_or_else(|| deobfuscate(&element_text(cell)));
            if email.contains('@') {
                contact.emails.insert(email);
            }
        }
        ContactKind::Phone => {
            let phone = scheme_value(cell, "tel:").unwrap_or_else(|| element_text(cell));
            if !phone.is_empty() {
                contact.phones.insert(phone);
            }
        }
        ContactKind::Address => {
            push_address(text_lines(cell), contact, seen_addresses);
        }
    }
}

/// The payload of the first matching link inside `cell`, if any.
fn scheme_value(cell: ElementRef<'_>, scheme: &str) -> Option<String> {
    let mut anchors = cell.descendants().filter_map(ElementRef::wrap);
    anchors.find_map(|element| {
        if element.value().name() != "a" {
            return None;
        }
        let href = element.value().attr("href")?.trim();
        link_payload(href, scheme)
    })
}

/// Links with `mailto:`/`tel:` hrefs anywhere in the page.
fn scheme_links(root: ElementRef<'_>, contact: &mut ContactInfo) {
    for anchor in root
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
    {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if let Some(email) = link_payload(href, "mailto:") {
            if email.contains('@') {
                contact.emails.insert(email);
            }
        } else if let Some(phone) = link_payload(href, "tel:") {
            if !phone.is_empty() {
                contact.phones.insert(phone);
            }
        }
    }
}

/// Payload after `scheme`, case-insensitive in the scheme only; for
/// mailto links the `?subject=...` suffix is stripped. The payload
/// itself stays verbatim apart from obfuscation-token rewriting.
fn link_payload(href: &str, scheme: &str) -> Option<String> {
    let prefix = href.get(..scheme.len())?;
    if !prefix.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let mut payload = &href[scheme.len()..];
    if scheme == "mailto:" {
        payload = payload.split('?').next().unwrap_or(payload);
    }
    let payload = deobfuscate(payload.trim());
    (!payload.is_empty()).then_some(payload)
}

/// Rewrite the common textual obfuscation tokens to `@` and `.`.
fn deobfuscate(text: &str) -> String {
    text.replace("(at)", "@")
        .replace("[at]", "@")
        .replace(" at ", "@")
        .replace(" AT ", "@")
        .replace("(dot)", ".")
        .replace("[dot]", ".")
        .replace(" dot ", ".")
        .replace(" DOT ", ".")
}

/// Attribute names whose values hold the local part of a split email.
const USER_ATTR_HINTS: [&str; 5] = [
    "data-user",
    "data-mail-user",
    "data-local",
    "data-name",
    "data-account",
];

/// Attribute names whose values hold the domain of a split email.
const DOMAIN_ATTR_HINTS: [&str; 3] = ["data-domain", "data-mail-domain", "data-host"];

/// Emails stored in element attributes rather than text: `data-cfemail`
/// hex payloads, plain `data-email` values, and local-part/domain pairs
/// split across two attributes.
fn attribute_emails(root: ElementRef<'_>, contact: &mut ContactInfo) {
    for element in root.descendants().filter_map(ElementRef::wrap) {
        if let Some(payload) = element.value().attr("data-cfemail") {
            if let Some(email) = decode_hex_xor_email(payload) {
                contact.emails.insert(email);
            }
        }

        if let Some(email) = element.value().attr("data-email") {
            let email = email.trim();
            if email.contains('@') {
                contact.emails.insert(email.to_string());
            }
        }

        let mut user = None;
        let mut domain = None;
        for (name, value) in element.value().attrs() {
            if user.is_none() && USER_ATTR_HINTS.iter().any(|hint| name.contains(hint)) {
                user = Some(value.trim());
            }
            if domain.is_none() && DOMAIN_ATTR_HINTS.iter().any(|hint| name.contains(hint)) {
                domain = Some(value.trim());
            }
        }
        if let (Some(user), Some(domain)) = (user, domain) {
            if !user.is_empty() && domain.contains('.') {
                contact.emails.insert(format!("{user}@{domain}"));
            }
        }
    }
}

/// Decode the hex-XOR email obfuscation behind `data-cfemail`
/// attributes: the first byte of the hex string is the key, every
/// following byte XORs against it.
fn decode_hex_xor_email(payload: &str) -> Option<String> {
    if payload.len() < 4 || payload.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..payload.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(payload.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    let key = bytes[0];
    let decoded: String = bytes[1..].iter().map(|byte| char::from(byte ^ key)).collect();
    decoded.contains('@').then_some(decoded)
}

/// `<address>` elements, line structure preserved.
fn address_elements(
    root: ElementRef<'_>,
    contact: &mut ContactInfo,
    seen_addresses: &mut HashSet<String>,
) {
    for element in root
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "address")
    {
        if has_ancestor_tag(element, &CHROME_TAGS) {
            continue;
        }
        push_address(text_lines(element), contact, seen_addresses);
    }
}

fn push_address(
    lines: Vec<String>,
    contact: &mut ContactInfo,
    seen_addresses: &mut HashSet<String>,
) {
    if lines.is_empty() {
        return;
    }
    let key = lines.join("\n").to_lowercase();
    if key.chars().count() <= 5 {
        return;
    }
    if seen_addresses.insert(key) {
        contact.addresses.push(lines);
    }
}

/// Final pass over visible text: plain emails, obfuscated emails, and
/// international phone numbers.
fn text_patterns(root: ElementRef<'_>, contact: &mut ContactInfo) {
    let text = visible_text(root);

    for email in EMAIL_RE.find_iter(&text) {
        contact.emails.insert(email.as_str().to_string());
    }

    for captures in OBFUSCATED_EMAIL_RE.captures_iter(&text) {
        let (Some(local), Some(domain)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let domain = DOT_TOKEN_RE.replace_all(domain.as_str(), ".");
        let domain: String = domain.chars().filter(|c| !c.is_whitespace()).collect();
        if domain.contains('.') {
            contact
                .emails
                .insert(format!("{}@{}", local.as_str(), domain));
        }
    }

    for phone in PHONE_RE.find_iter(&text) {
        contact.phones.insert(phone.as_str().trim().to_string());
    }
}

/// Text nodes outside `script`/`style`, space-joined.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let in_script = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| matches!(ancestor.value().name(), "script" | "style"));
        if in_script {
            continue;
        }
        text.push_str(fragment);
        text.push(' ');
    }
    text
}
