//! Registry of content-type configurations and their detection signals.
//!
//! Configurations are registered in priority order: the detector walks
//! entries front to back, so earlier registrations win URL and marker
//! ties. [`create_default_registry`] installs the four built-in types.

use std::sync::LazyLock;

use crate::config::{ContentConfig, ContentType, SectionStrategy};

/// Declarative detection signals for one content type.
///
/// All three signal kinds are optional; an entry with an empty rule is
/// reachable only through the fallback tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionRule {
    /// Substrings matched against the lowercased URL.
    pub url_patterns: Vec<String>,

    /// Substrings matched against lowercased element class/id text.
    pub marker_patterns: Vec<String>,

    /// Domain vocabulary matched against the lowercased document text.
    pub keywords: Vec<String>,
}

impl DetectionRule {
    /// Create a rule with no signals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL substring patterns.
    #[must_use]
    pub fn with_url_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.url_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the class/id marker patterns.
    #[must_use]
    pub fn with_marker_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.marker_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the domain keywords.
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// A registered configuration together with its detection signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Extraction parameters for this content type.
    pub config: ContentConfig,

    /// How documents of this type are recognized.
    pub rule: DetectionRule,
}

/// Ordered collection of content-type configurations.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    entries: Vec<RegistryEntry>,
}

static GENERIC_FALLBACK: LazyLock<ContentConfig> = LazyLock::new(generic_config);

impl ConfigRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configuration with its detection rule.
    ///
    /// Re-registering an already-present content type replaces its
    /// entry in place, keeping its original priority position.
    pub fn register(&mut self, config: ContentConfig, rule: DetectionRule) {
        let content_type = config.content_type;
        let entry = RegistryEntry { config, rule };
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.config.content_type == content_type)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Look up the configuration for a content type.
    #[must_use]
    pub fn get(&self, content_type: ContentType) -> Option<&ContentConfig> {
        self.entries
            .iter()
            .find(|entry| entry.config.content_type == content_type)
            .map(|entry| &entry.config)
    }

    /// All entries in registration (priority) order.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// The configuration used when no detection tier matches.
    ///
    /// Uses the registered [`ContentType::Generic`] entry if present,
    /// otherwise a built-in generic configuration, so detection can
    /// never come up empty-handed.
    #[must_use]
    pub fn fallback(&self) -> &ContentConfig {
        self.get(ContentType::Generic)
            .unwrap_or(&GENERIC_FALLBACK)
    }
}

fn generic_config() -> ContentConfig {
    ContentConfig::new(ContentType::Generic)
        .with_container_patterns([
            "content",
            "article",
            "main",
            "body-content",
            "text",
            "body",
            "section",
            "info",
            "about",
        ])
        .with_section_strategy(SectionStrategy::Heading)
        .with_skip_heading_keywords(["navigation", "menu", "footer"])
}

/// Build the registry with the four built-in content types.
///
/// Registration order doubles as detection priority: digital editions
/// carry the most distinctive vocabulary, so they are checked first;
/// generic is last and signal-free.
#[must_use]
pub fn create_default_registry() -> ConfigRegistry {
    let mut registry = ConfigRegistry::new();

    registry.register(
        ContentConfig::new(ContentType::DigitalEdition)
            .with_container_patterns([
                "edition-content",
                "text-body",
                "manuscript-text",
                "critical-text",
                "apparatus",
                "commentary",
                "annotation",
                "transcription",
                "diplomatic",
                "normalized",
                "content",
                "text",
                "main",
                "body",
                "article",
                "section",
            ])
            .with_section_strategy(SectionStrategy::Heading)
            .with_skip_heading_keywords(["navigation", "menu", "footer", "copyright"]),
        DetectionRule::new()
            .with_url_patterns(["edition", "manuscript", "archive", "corpus"])
            .with_marker_patterns([
                "edition-content",
                "manuscript-text",
                "critical-text",
                "apparatus",
                "transcription",
                "diplomatic",
            ])
            .with_keywords([
                "edition",
                "manuscript",
                "diplomatic",
                "apparatus",
                "transcription",
                "critical edition",
                "textual witness",
                "variant",
                "lemma",
            ]),
    );

    registry.register(
        ContentConfig::new(ContentType::ResearcherProfile)
            .with_container_patterns([
                "personcard--content",
                "textimage--content",
                "richtext",
                "person-bio",
                "biography",
                "team-detail",
                "staff-profile",
                "content",
                "text",
                "main",
                "body",
                "article",
                "section",
                "info",
                "about",
                "detail",
            ])
            .with_section_strategy(SectionStrategy::Explicit)
            .with_skip_heading_keywords([
                "navigation",
                "footer",
                "sprachwahl",
                "wichtige seiten",
                "rechtliches",
                "impressum",
                "adresse",
                "partner",
                "hier",
                "quicklinks",
                "hauptnavigation",
                "weiterf\u{fc}hrende",
                "menu",
                "sidebar",
                "widget",
            ]),
        DetectionRule::new()
            .with_url_patterns(["team", "people", "personen", "staff"])
            .with_marker_patterns([
                "personcard",
                "team-detail",
                "staff-profile",
                "researcher-profile",
            ])
            .with_keywords([
                "personcard",
                "staff",
                "team",
                "researcher",
                "professor",
                "publikationen",
                "publications",
                "forschung",
                "research",
                "curriculum vitae",
                "biography",
            ]),
    );

    registry.register(
        ContentConfig::new(ContentType::InstitutionalPage)
            .with_container_patterns([
                "main-content",
                "page-content",
                "article-body",
                "content-area",
                "content",
                "text",
                "main",
                "body",
                "article",
                "section",
            ])
            .with_section_strategy(SectionStrategy::Heading)
            .with_skip_heading_keywords(["navigation", "menu", "footer", "sidebar"]),
        DetectionRule::new()
            .with_url_patterns(["about", "ueber", "institut", "department"])
            .with_marker_patterns([
                "main-content",
                "page-content",
                "article-body",
                "content-area",
            ])
            .with_keywords(["institute", "department", "faculty", "about us", "mission"]),
    );

    registry.register(generic_config(), DetectionRule::new());

    registry
}
