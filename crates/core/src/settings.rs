//! Site-wide settings.
//!
//! Settings are stored as one object. The background video is edited from
//! its own admin panel and stored under a separate key; [`effective`]
//! overlays it on read.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl Default for SocialMedia {
    fn default() -> Self {
        Self {
            facebook: Some("https://facebook.com/bikesdeal".to_owned()),
            twitter: Some("https://twitter.com/bikesdeal".to_owned()),
            instagram: Some("https://instagram.com/bikesdeal".to_owned()),
            linkedin: Some("https://linkedin.com/company/bikesdeal".to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seo {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
}

impl Default for Seo {
    fn default() -> Self {
        Self {
            meta_title: "BikesDeal - Buy & Sell Bikes Online".to_owned(),
            meta_description: "Find the best deals on bikes. Buy and sell motorcycles, scooters, and bicycles with ease.".to_owned(),
            keywords: [
                "bikes",
                "motorcycles",
                "scooters",
                "buy bikes",
                "sell bikes",
                "bike deals",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#dc2626".to_owned(),
            secondary_color: "#1f2937".to_owned(),
            accent_color: "#f59e0b".to_owned(),
            background_color: "#ffffff".to_owned(),
            text_color: "#111827".to_owned(),
        }
    }
}

/// Hero background video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundVideo {
    pub url: String,
    pub is_enabled: bool,
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for BackgroundVideo {
    fn default() -> Self {
        Self {
            url: String::new(),
            is_enabled: false,
            opacity: 0.5,
        }
    }
}

impl BackgroundVideo {
    /// Clamp opacity into `[0, 1]`; a NaN opacity becomes the default.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.opacity = if self.opacity.is_nan() {
            Self::default().opacity
        } else {
            self.opacity.clamp(0.0, 1.0)
        };
        self
    }
}

/// Site-wide settings. Missing stored fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub social_media: SocialMedia,
    pub seo: Seo,
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_video: Option<BackgroundVideo>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "BikesDeal".to_owned(),
            site_description: "Your trusted partner for buying and selling bikes".to_owned(),
            contact_email: "info@bikesdeal.com".to_owned(),
            contact_phone: "+91 9876543210".to_owned(),
            address: "123 Bike Street, Mumbai, Maharashtra 400001".to_owned(),
            social_media: SocialMedia::default(),
            seo: Seo::default(),
            theme: Theme::default(),
            background_video: Some(BackgroundVideo::default()),
        }
    }
}

/// Partial settings update; each present top-level field replaces the
/// stored one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_video: Option<BackgroundVideo>,
}

impl SiteSettings {
    /// Shallow-merge `patch` into these settings.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.site_name {
            self.site_name = v;
        }
        if let Some(v) = patch.site_description {
            self.site_description = v;
        }
        if let Some(v) = patch.contact_email {
            self.contact_email = v;
        }
        if let Some(v) = patch.contact_phone {
            self.contact_phone = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.social_media {
            self.social_media = v;
        }
        if let Some(v) = patch.seo {
            self.seo = v;
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = patch.background_video {
            self.background_video = Some(v.clamped());
        }
    }
}

/// Settings as the public site sees them: stored settings (or defaults)
/// with the separately stored background video laid over.
#[must_use]
pub fn effective(stored: Option<SiteSettings>, video: Option<BackgroundVideo>) -> SiteSettings {
    let mut settings = stored.unwrap_or_default();
    if let Some(video) = video {
        settings.background_video = Some(video.clamped());
    }
    settings
}
