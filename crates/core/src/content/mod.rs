//! Content sections: the CMS-style copy behind every public page.
//!
//! The site's copy lives in one ordered collection of [`ContentSection`]s.
//! Stores load the whole collection, apply one of the operations on
//! [`SectionList`], and write the whole collection back.
//!
//! # Modules
//!
//! - [`fields`] - Per-kind structured fields
//! - [`defaults`] - Hardcoded defaults used for seeding and fallback
//! - [`resolve`] - Merging stored sections over defaults

pub mod defaults;
pub mod fields;
pub mod resolve;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::SectionId;

pub use fields::{Overlay, SectionFields};
pub use resolve::{ResolvedBlock, ResolvedSite, resolve};

/// The fixed site blocks a section can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Hero,
    Services,
    HowItWorks,
    Testimonials,
    Partners,
    Contact,
    Footer,
}

impl SectionKind {
    /// All kinds in page order.
    pub const ALL: [Self; 8] = [
        Self::Header,
        Self::Hero,
        Self::Services,
        Self::HowItWorks,
        Self::Testimonials,
        Self::Partners,
        Self::Contact,
        Self::Footer,
    ];

    /// The section id that drives this block.
    #[must_use]
    pub const fn canonical_id(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Hero => "hero",
            Self::Services => "services",
            Self::HowItWorks => "how-it-works",
            Self::Testimonials => "testimonials",
            Self::Partners => "partners",
            Self::Contact => "contact",
            Self::Footer => "footer",
        }
    }

    /// Numeric id used for this block by early content collections.
    #[must_use]
    pub const fn legacy_id(self) -> Option<&'static str> {
        match self {
            Self::Hero => Some("1"),
            Self::Services => Some("2"),
            Self::HowItWorks => Some("3"),
            _ => None,
        }
    }

    /// The `kind` tag used when serializing [`SectionFields`].
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Hero => "hero",
            Self::Services => "services",
            Self::HowItWorks => "how_it_works",
            Self::Testimonials => "testimonials",
            Self::Partners => "partners",
            Self::Contact => "contact",
            Self::Footer => "footer",
        }
    }

    /// The block a section id refers to, by canonical or legacy id.
    #[must_use]
    pub fn for_section_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.canonical_id() == id || kind.legacy_id() == Some(id))
    }
}

/// Presentation hints an admin can attach to a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "customCSS")]
    pub custom_css: Option<String>,
}

/// One editable block of site copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSection")]
pub struct ContentSection {
    pub id: SectionId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
    pub is_visible: bool,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SectionMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<SectionFields>,
}

impl ContentSection {
    /// An empty, visible section with the given id.
    #[must_use]
    pub fn blank(id: SectionId) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            description: None,
            images: Vec::new(),
            is_visible: true,
            order: 0,
            metadata: None,
            fields: None,
        }
    }

    /// Apply a partial update, replacing each top-level field present in
    /// `patch`.
    pub fn apply(&mut self, patch: SectionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(is_visible) = patch.is_visible {
            self.is_visible = is_visible;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = Some(metadata);
        }
        if let Some(fields) = patch.fields {
            self.fields = SectionFields::from_stored(self.id.as_str(), fields);
        }
    }
}

/// Lenient on-disk form of [`ContentSection`].
///
/// Stored collections predate several fields, so everything but the id
/// has a default, and `fields` is interpreted against the section id.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSection {
    id: SectionId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default = "visible_by_default")]
    is_visible: bool,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    metadata: Option<SectionMetadata>,
    #[serde(default)]
    fields: Option<Value>,
}

const fn visible_by_default() -> bool {
    true
}

impl From<StoredSection> for ContentSection {
    fn from(stored: StoredSection) -> Self {
        let fields = stored
            .fields
            .and_then(|value| SectionFields::from_stored(stored.id.as_str(), value));
        Self {
            id: stored.id,
            title: stored.title,
            content: stored.content,
            description: stored.description,
            images: stored.images,
            is_visible: stored.is_visible,
            order: stored.order.unwrap_or(0),
            metadata: stored.metadata,
            fields,
        }
    }
}

/// A partial section update sent by the admin console.
///
/// `fields` stays raw JSON until applied, so untagged field maps can be
/// typed by the id of the section they land on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SectionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

/// Filter for [`SectionList::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ContentFilter {
    /// Keep only sections with `isVisible` set.
    #[serde(default, rename = "visible")]
    pub visible_only: bool,
}

/// The persisted collection of content sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionList(Vec<ContentSection>);

impl SectionList {
    /// Build a collection, dropping every section whose id repeats an
    /// earlier one. Returns the collection and the dropped ids.
    #[must_use]
    pub fn dedup(sections: Vec<ContentSection>) -> (Self, Vec<SectionId>) {
        let mut kept: Vec<ContentSection> = Vec::with_capacity(sections.len());
        let mut dropped = Vec::new();
        for section in sections {
            if kept.iter().any(|s| s.id == section.id) {
                dropped.push(section.id);
            } else {
                kept.push(section);
            }
        }
        (Self(kept), dropped)
    }

    /// The seeded default collection.
    #[must_use]
    pub fn defaults() -> Self {
        Self(defaults::default_sections())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ContentSection] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<ContentSection> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContentSection> {
        self.0.iter().find(|s| s.id == id)
    }

    /// Sections matching `filter`, ascending by `order`; ties keep their
    /// stored order.
    #[must_use]
    pub fn list(&self, filter: ContentFilter) -> Vec<ContentSection> {
        let mut sections: Vec<ContentSection> = self
            .0
            .iter()
            .filter(|s| !filter.visible_only || s.is_visible)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Merge `patch` into section `id`, creating it from a blank section
    /// if absent. Returns the stored section.
    pub fn upsert(&mut self, id: &str, patch: SectionPatch) -> ContentSection {
        if let Some(section) = self.0.iter_mut().find(|s| s.id == id) {
            section.apply(patch);
            return section.clone();
        }

        let mut section = ContentSection::blank(SectionId::new(id));
        section.apply(patch);
        self.0.push(section.clone());
        section
    }

    /// Append a new section with a generated id.
    ///
    /// When `patch` has no `order`, the section goes last
    /// (`order = len + 1`).
    pub fn add(&mut self, patch: SectionPatch) -> ContentSection {
        let mut id = SectionId::generate();
        while self.get(id.as_str()).is_some() {
            let millis = id.as_str().parse::<i64>().unwrap_or_default();
            id = SectionId::generate_after(millis);
        }

        let mut section = ContentSection::blank(id);
        section.order = i64::try_from(self.0.len()).unwrap_or(i64::MAX - 1) + 1;
        section.apply(patch);
        self.0.push(section.clone());
        section
    }

    /// Remove section `id`. Returns `false` when it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|s| s.id != id);
        self.0.len() != before
    }

    /// Number of visible sections.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_visible).count()
    }
}
