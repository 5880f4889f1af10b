//! Resolution of stored sections over hardcoded defaults.
//!
//! For each site block the driving section is found by canonical id,
//! then by legacy id, then by the first section whose typed fields match
//! the block's kind. The block's values are that section's fields
//! overlaid on the block defaults; a block with no section is entirely
//! default and visible.
//!
//! The services, how-it-works and testimonials blocks take their heading
//! from the section's own `title` and `content` when those are non-empty,
//! ahead of both the typed fields and the defaults.

use serde::Serialize;

use super::defaults;
use super::fields::{
    ContactFields, FooterFields, HeaderFields, HeroFields, HowItWorksFields, Overlay,
    PartnersFields, SectionFields, ServicesFields, TestimonialsFields,
};
use super::{ContentSection, SectionKind};
use crate::settings::SiteSettings;
use crate::types::SectionId;

/// A per-kind field set that can be resolved into a site block.
pub trait BlockFields: Overlay + Sized {
    const KIND: SectionKind;

    /// Extract this kind's fields, if `fields` is of this kind.
    fn from_fields(fields: &SectionFields) -> Option<Self>;

    /// Fully populated fallback values.
    fn defaults() -> Self;

    /// Replace the block heading with the section's own title and body.
    #[must_use]
    fn with_heading(self, _title: &str, _content: &str) -> Self {
        self
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

macro_rules! block_fields {
    ($ty:ident, $variant:ident, $defaults:path $(, heading: $title:ident, $body:ident)?) => {
        impl BlockFields for $ty {
            const KIND: SectionKind = SectionKind::$variant;

            fn from_fields(fields: &SectionFields) -> Option<Self> {
                match fields {
                    SectionFields::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }

            fn defaults() -> Self {
                $defaults()
            }

            $(
                fn with_heading(self, title: &str, content: &str) -> Self {
                    Self {
                        $title: non_empty(title).or(self.$title),
                        $body: non_empty(content).or(self.$body),
                        ..self
                    }
                }
            )?
        }
    };
}

block_fields!(HeaderFields, Header, defaults::header_block);
block_fields!(HeroFields, Hero, defaults::hero_block);
block_fields!(ServicesFields, Services, defaults::services_block, heading: title, description);
block_fields!(
    HowItWorksFields,
    HowItWorks,
    defaults::how_it_works_block,
    heading: title,
    description
);
block_fields!(
    TestimonialsFields,
    Testimonials,
    defaults::testimonials_block,
    heading: section_title,
    section_subtitle
);
block_fields!(PartnersFields, Partners, defaults::partners_block);
block_fields!(ContactFields, Contact, defaults::contact_block);
block_fields!(FooterFields, Footer, defaults::footer_block);

/// One resolved site block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBlock<T> {
    /// Id of the section that drove this block, if any.
    pub section_id: Option<SectionId>,
    /// `false` when the driving section is hidden. Its overrides are
    /// still applied so the admin preview shows them.
    pub visible: bool,
    pub fields: T,
}

/// The whole public site after resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSite {
    pub header: ResolvedBlock<HeaderFields>,
    pub hero: ResolvedBlock<HeroFields>,
    pub services: ResolvedBlock<ServicesFields>,
    pub how_it_works: ResolvedBlock<HowItWorksFields>,
    pub testimonials: ResolvedBlock<TestimonialsFields>,
    pub partners: ResolvedBlock<PartnersFields>,
    pub contact: ResolvedBlock<ContactFields>,
    pub footer: ResolvedBlock<FooterFields>,
    pub settings: SiteSettings,
}

/// Find the section driving `kind`.
#[must_use]
pub fn find_section(sections: &[ContentSection], kind: SectionKind) -> Option<&ContentSection> {
    sections
        .iter()
        .find(|s| s.id == kind.canonical_id())
        .or_else(|| {
            kind.legacy_id()
                .and_then(|legacy| sections.iter().find(|s| s.id == legacy))
        })
        .or_else(|| {
            sections
                .iter()
                .find(|s| s.fields.as_ref().and_then(SectionFields::kind) == Some(kind))
        })
}

/// Resolve a single block of kind `T::KIND`.
#[must_use]
pub fn resolve_block<T: BlockFields>(sections: &[ContentSection]) -> ResolvedBlock<T> {
    let Some(section) = find_section(sections, T::KIND) else {
        return ResolvedBlock {
            section_id: None,
            visible: true,
            fields: T::defaults(),
        };
    };

    let fields = match section.fields.as_ref().and_then(T::from_fields) {
        Some(overrides) => overrides.overlay(T::defaults()),
        None => T::defaults(),
    }
    .with_heading(&section.title, &section.content);

    ResolvedBlock {
        section_id: Some(section.id.clone()),
        visible: section.is_visible,
        fields,
    }
}

/// Resolve every site block and attach the effective settings.
#[must_use]
pub fn resolve(sections: &[ContentSection], settings: SiteSettings) -> ResolvedSite {
    ResolvedSite {
        header: resolve_block(sections),
        hero: resolve_block(sections),
        services: resolve_block(sections),
        how_it_works: resolve_block(sections),
        testimonials: resolve_block(sections),
        partners: resolve_block(sections),
        contact: resolve_block(sections),
        footer: resolve_block(sections),
        settings,
    }
}
