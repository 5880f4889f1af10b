//! Structured per-kind fields attached to content sections.
//!
//! Each site block has its own field struct. Every field is optional: a
//! stored section only carries the values an admin actually overrode, and
//! resolution fills the rest from [`defaults`](super::defaults).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SectionKind;

/// Fields of one content section, tagged by section kind.
///
/// Serialized with a `kind` discriminator next to the field values:
///
/// ```json
/// { "kind": "hero", "bannerTitle": "Instant Payment" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionFields {
    Header(HeaderFields),
    Hero(HeroFields),
    Services(ServicesFields),
    HowItWorks(HowItWorksFields),
    Testimonials(TestimonialsFields),
    Partners(PartnersFields),
    Contact(ContactFields),
    Footer(FooterFields),
    /// Free-form values for admin-created sections with no site block.
    Custom(CustomFields),
}

impl SectionFields {
    /// The site block these fields belong to, `None` for custom sections.
    #[must_use]
    pub const fn kind(&self) -> Option<SectionKind> {
        match self {
            Self::Header(_) => Some(SectionKind::Header),
            Self::Hero(_) => Some(SectionKind::Hero),
            Self::Services(_) => Some(SectionKind::Services),
            Self::HowItWorks(_) => Some(SectionKind::HowItWorks),
            Self::Testimonials(_) => Some(SectionKind::Testimonials),
            Self::Partners(_) => Some(SectionKind::Partners),
            Self::Contact(_) => Some(SectionKind::Contact),
            Self::Footer(_) => Some(SectionKind::Footer),
            Self::Custom(_) => None,
        }
    }

    /// Interpret a raw JSON field map stored under section `section_id`.
    ///
    /// Maps carrying a valid `kind` tag parse directly. Untagged maps (as
    /// written before fields were typed) take the kind implied by the
    /// section id. Anything that still does not fit a known kind is kept
    /// verbatim as [`SectionFields::Custom`] so no admin data is lost.
    #[must_use]
    pub fn from_stored(section_id: &str, value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };

        if map.contains_key("kind")
            && let Ok(fields) = serde_json::from_value(Value::Object(map.clone()))
        {
            return Some(fields);
        }

        if let Some(kind) = SectionKind::for_section_id(section_id) {
            map.insert("kind".to_owned(), Value::from(kind.tag()));
            if let Ok(fields) = serde_json::from_value(Value::Object(map.clone())) {
                return Some(fields);
            }
        }

        map.remove("kind");
        Some(Self::Custom(CustomFields { values: map }))
    }
}

/// Combine an override with a base value, field by field.
pub trait Overlay {
    /// Take every field present in `self`, falling back to `base`.
    #[must_use]
    fn overlay(self, base: Self) -> Self;
}

/// Implements [`Overlay`] for a struct whose fields are all `Option`.
macro_rules! impl_overlay {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl Overlay for $ty {
            fn overlay(self, base: Self) -> Self {
                Self {
                    $($field: self.$field.or(base.$field),)+
                }
            }
        }
    };
}

/// A navigation or footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_owned(),
            href: href.to_owned(),
        }
    }
}

/// A card with a title, description and icon name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_items: Option<Vec<Link>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_button_text: Option<String>,
}

impl_overlay!(HeaderFields {
    site_name,
    navigation_items,
    cta_button_text,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_button_text: Option<String>,
}

impl_overlay!(HeroFields {
    banner_title,
    banner_subtitle,
    main_title,
    description,
    primary_button_text,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Feature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_button_text: Option<String>,
}

impl_overlay!(ServicesFields {
    title,
    description,
    services,
    cta_button_text,
});

/// One step of the selling process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Human-readable duration, e.g. "2 minutes".
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HowItWorksFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Vec<Faq>>,
}

impl_overlay!(HowItWorksFields {
    title,
    description,
    steps,
    features,
    faqs,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub text: String,
    pub bike: String,
    /// Initials shown in place of a photo.
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<Vec<Testimonial>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<Stat>>,
}

impl_overlay!(TestimonialsFields {
    section_title,
    section_subtitle,
    testimonials,
    stats,
});

/// A brand or bank partner, rendered as a text logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnersFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<Partner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banking_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_partners: Option<Vec<Partner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_benefits: Option<Vec<Feature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_button_text: Option<String>,
}

impl_overlay!(PartnersFields {
    title,
    content,
    brands_title,
    partners,
    banking_title,
    bank_partners,
    benefits_title,
    partner_benefits,
    cta_button_text,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfoItem {
    pub title: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Vec<ContactInfoItem>>,
}

impl_overlay!(ContactFields {
    title,
    content,
    form_title,
    success_message,
    contact_info_title,
    contact_info,
});

/// Footer link columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLinks {
    #[serde(default)]
    pub company: Vec<Link>,
    #[serde(default)]
    pub services: Vec<Link>,
    #[serde(default)]
    pub support: Vec<Link>,
    #[serde(default)]
    pub legal: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribe_button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_links: Option<FooterLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<Link>>,
}

impl_overlay!(FooterFields {
    company_name,
    company_description,
    phone,
    email,
    address,
    newsletter_title,
    newsletter_description,
    subscribe_button_text,
    copyright,
    footer_links,
    social_links,
});

/// Open field map for admin-created sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    #[serde(flatten)]
    pub values: Map<String, Value>,
}
