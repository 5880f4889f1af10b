//! Versioned export/import bundles.
//!
//! A bundle is a JSON document carrying its export time, a format
//! version, and any of the lead, content, and settings collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{ContentSection, SectionList};
use crate::lead::LeadSubmission;
use crate::settings::SiteSettings;
use crate::types::SectionId;

/// Format version written into new bundles.
pub const BUNDLE_VERSION: &str = "1.0";

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("Invalid file format. Missing required metadata.")]
    MissingMetadata,

    #[error("No valid data found in the file.")]
    NothingToImport,

    #[error("invalid {collection}: {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Which collections an export contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportType {
    #[default]
    All,
    Submissions,
    Content,
    Settings,
}

impl ExportType {
    /// Suggested download filename, e.g. `bikesdeal-content-2025-03-14.json`.
    #[must_use]
    pub fn filename(self, at: DateTime<Utc>) -> String {
        let label = match self {
            Self::All => "complete",
            Self::Submissions => "submissions",
            Self::Content => "content",
            Self::Settings => "settings",
        };
        format!("bikesdeal-{label}-{}.json", at.format("%Y-%m-%d"))
    }
}

impl std::fmt::Display for ExportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Submissions => write!(f, "submissions"),
            Self::Content => write!(f, "content"),
            Self::Settings => write!(f, "settings"),
        }
    }
}

impl std::str::FromStr for ExportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "submissions" => Ok(Self::Submissions),
            "content" => Ok(Self::Content),
            "settings" => Ok(Self::Settings),
            _ => Err(format!("invalid export type: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub exported_at: DateTime<Utc>,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: ExportType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike_submissions: Option<Vec<LeadSubmission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_sections: Option<Vec<ContentSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_settings: Option<SiteSettings>,
}

impl ExportBundle {
    /// Build a bundle of `kind`, keeping only the collections it names.
    #[must_use]
    pub fn new(
        kind: ExportType,
        at: DateTime<Utc>,
        leads: Vec<LeadSubmission>,
        sections: Vec<ContentSection>,
        settings: SiteSettings,
    ) -> Self {
        let wants = |k| kind == ExportType::All || kind == k;
        Self {
            exported_at: at,
            version: BUNDLE_VERSION.to_owned(),
            kind,
            bike_submissions: wants(ExportType::Submissions).then_some(leads),
            content_sections: wants(ExportType::Content).then_some(sections),
            site_settings: wants(ExportType::Settings).then_some(settings),
        }
    }
}

/// The importable parts of a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBundle {
    pub exported_at: String,
    pub bike_submissions: Option<Vec<LeadSubmission>>,
    pub content_sections: Option<SectionList>,
    pub site_settings: Option<SiteSettings>,
    /// Section ids dropped because an earlier section had the same id.
    pub dropped_sections: Vec<SectionId>,
}

/// Counts of what an import wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub exported_at: String,
    pub bike_submissions: Option<usize>,
    pub content_sections: Option<usize>,
    pub site_settings: bool,
}

impl ImportSummary {
    /// Human-readable list, e.g. `3 bike submissions, site settings`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut items = Vec::new();
        if let Some(n) = self.bike_submissions {
            items.push(format!("{n} bike submissions"));
        }
        if let Some(n) = self.content_sections {
            items.push(format!("{n} content sections"));
        }
        if self.site_settings {
            items.push("site settings".to_owned());
        }
        items.join(", ")
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn parse_collection<T: serde::de::DeserializeOwned>(
    value: Option<Value>,
    collection: &'static str,
) -> Result<Option<T>, ImportError> {
    value
        .map(|v| {
            serde_json::from_value(v).map_err(|source| ImportError::Malformed { collection, source })
        })
        .transpose()
}

impl ImportBundle {
    /// Parse an uploaded bundle.
    ///
    /// Requires `exportedAt` and `version`. Collections must be arrays
    /// (submissions, sections) or an object (settings) to count; other
    /// shapes are skipped. Duplicate section ids after the first are
    /// dropped.
    ///
    /// # Errors
    ///
    /// [`ImportError::MissingMetadata`] without the metadata,
    /// [`ImportError::NothingToImport`] when no collection is present, and
    /// [`ImportError::Malformed`] when a present collection does not parse.
    pub fn parse(document: Value) -> Result<Self, ImportError> {
        let Value::Object(mut map) = document else {
            return Err(ImportError::MissingMetadata);
        };

        let exported_at = non_empty_str(map.get("exportedAt"));
        let has_version = match map.get("version") {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Number(_)) => true,
            _ => false,
        };
        let Some(exported_at) = exported_at.filter(|_| has_version) else {
            return Err(ImportError::MissingMetadata);
        };

        let submissions = map.remove("bikeSubmissions").filter(Value::is_array);
        let sections = map.remove("contentSections").filter(Value::is_array);
        let settings = map.remove("siteSettings").filter(Value::is_object);

        let (content_sections, dropped_sections) =
            match parse_collection::<Vec<ContentSection>>(sections, "content sections")? {
                Some(sections) => {
                    let (list, dropped) = SectionList::dedup(sections);
                    (Some(list), dropped)
                }
                None => (None, Vec::new()),
            };

        let bundle = Self {
            exported_at,
            bike_submissions: parse_collection(submissions, "bike submissions")?,
            content_sections,
            site_settings: parse_collection(settings, "site settings")?,
            dropped_sections,
        };

        if bundle.bike_submissions.is_none()
            && bundle.content_sections.is_none()
            && bundle.site_settings.is_none()
        {
            return Err(ImportError::NothingToImport);
        }
        Ok(bundle)
    }

    #[must_use]
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            exported_at: self.exported_at.clone(),
            bike_submissions: self.bike_submissions.as_ref().map(Vec::len),
            content_sections: self.content_sections.as_ref().map(SectionList::len),
            site_settings: self.site_settings.is_some(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_export_keeps_only_requested_collection() {
        let bundle = ExportBundle::new(
            ExportType::Settings,
            at(),
            Vec::new(),
            SectionList::defaults().into_inner(),
            SiteSettings::default(),
        );
        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value.get("type"), Some(&json!("settings")));
        assert_eq!(value.get("version"), Some(&json!("1.0")));
        assert!(value.get("contentSections").is_none());
        assert!(value.get("siteSettings").is_some());
    }

    #[test]
    fn test_export_roundtrips_through_import() {
        let bundle = ExportBundle::new(
            ExportType::All,
            at(),
            Vec::new(),
            SectionList::defaults().into_inner(),
            SiteSettings::default(),
        );
        let imported = ImportBundle::parse(serde_json::to_value(&bundle).unwrap()).unwrap();
        let summary = imported.summary();
        assert_eq!(summary.bike_submissions, Some(0));
        assert_eq!(summary.content_sections, Some(8));
        assert!(summary.site_settings);
    }

    #[test]
    fn test_import_requires_metadata() {
        let result = ImportBundle::parse(json!({"contentSections": []}));
        assert!(matches!(result, Err(ImportError::MissingMetadata)));
        let result = ImportBundle::parse(json!({"exportedAt": "2025-03-14", "contentSections": []}));
        assert!(matches!(result, Err(ImportError::MissingMetadata)));
    }

    #[test]
    fn test_import_with_nothing_importable() {
        let result = ImportBundle::parse(json!({
            "exportedAt": "2025-03-14T08:30:00Z",
            "version": "1.0",
            "contentSections": "not a list"
        }));
        assert!(matches!(result, Err(ImportError::NothingToImport)));
    }

    #[test]
    fn test_import_drops_duplicate_sections() {
        let imported = ImportBundle::parse(json!({
            "exportedAt": "2025-03-14T08:30:00Z",
            "version": "1.0",
            "contentSections": [{"id": "hero"}, {"id": "hero"}]
        }))
        .unwrap();
        assert_eq!(imported.summary().content_sections, Some(1));
        assert_eq!(imported.dropped_sections, vec![SectionId::new("hero")]);
        assert_eq!(imported.summary().describe(), "1 content sections");
    }

    #[test]
    fn test_import_reads_form_text_submissions() {
        let imported = ImportBundle::parse(json!({
            "exportedAt": "2024-11-02T09:15:00.000Z",
            "version": "1.0",
            "bikeSubmissions": [{
                "id": "1730538900000",
                "ownerInfo": {
                    "name": "Karan",
                    "email": "karan@example.com",
                    "phone": "9811122233",
                    "address": "Pune"
                },
                "bikeDetails": {
                    "brand": "Yamaha",
                    "model": "R15",
                    "year": "2021",
                    "kmDriven": "15000",
                    "fuelType": "Petrol",
                    "transmission": "Manual",
                    "owners": 1,
                    "registrationState": "MH",
                    "expectedPrice": "125000"
                },
                "additionalInfo": {"condition": "Excellent"},
                "images": [],
                "submittedAt": "2024-11-02T09:15:00.000Z",
                "status": "pending"
            }]
        }))
        .unwrap();
        let leads = imported.bike_submissions.unwrap();
        let details = &leads.first().unwrap().bike_details;
        assert_eq!(details.year, 2021);
        assert_eq!(details.km_driven, 15_000);
        assert_eq!(details.expected_price, rust_decimal::Decimal::new(125_000, 0));
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            ExportType::Content.filename(at()),
            "bikesdeal-content-2025-03-14.json"
        );
    }
}
