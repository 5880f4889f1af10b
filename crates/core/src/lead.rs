//! Lead (bike) submissions.
//!
//! A lead is created by the public sell-your-bike form and afterwards only
//! changes through an admin status update or deletion.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Email, EmailError, LeadId, LeadStatus};

/// Earliest model year accepted on a new lead.
pub const MIN_MODEL_YEAR: i32 = 1900;

/// Errors from validating a [`NewLead`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LeadError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid owner email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("model year {0} is out of range")]
    InvalidYear(i32),

    #[error("expected price cannot be negative")]
    NegativePrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Numeric form fields arrive as JSON numbers or as the text the form
/// field held.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Deserialize a number that may be sent as a string. Blank text reads as
/// the type's default.
fn number_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    T::Err: std::fmt::Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) if text.trim().is_empty() => Ok(T::default()),
        NumberOrText::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeDetails {
    pub brand: String,
    pub model: String,
    #[serde(deserialize_with = "number_or_text")]
    pub year: i32,
    #[serde(default, deserialize_with = "number_or_text")]
    pub km_driven: u32,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default = "default_transmission")]
    pub transmission: String,
    #[serde(default = "default_owners")]
    pub owners: u8,
    #[serde(default)]
    pub registration_state: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "number_or_text"
    )]
    pub expected_price: Decimal,
}

fn default_transmission() -> String {
    "Manual".to_owned()
}

const fn default_owners() -> u8 {
    1
}

fn none_text() -> String {
    "None".to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    #[serde(default)]
    pub condition: String,
    #[serde(default = "none_text")]
    pub modifications: String,
    #[serde(default = "none_text")]
    pub accident_history: String,
    #[serde(default = "none_text")]
    pub service_history: String,
    #[serde(default = "default_reason")]
    pub reason: String,
    #[serde(default = "default_urgency")]
    pub urgency: String,
}

fn default_reason() -> String {
    "Not specified".to_owned()
}

fn default_urgency() -> String {
    "Normal".to_owned()
}

impl Default for AdditionalInfo {
    fn default() -> Self {
        Self {
            condition: String::new(),
            modifications: none_text(),
            accident_history: none_text(),
            service_history: none_text(),
            reason: default_reason(),
            urgency: default_urgency(),
        }
    }
}

/// A stored lead submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub id: LeadId,
    pub owner_info: OwnerInfo,
    pub bike_details: BikeDetails,
    #[serde(default)]
    pub additional_info: AdditionalInfo,
    #[serde(default)]
    pub images: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: LeadStatus,
}

/// A lead as submitted by the public form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub owner_info: OwnerInfo,
    pub bike_details: BikeDetails,
    #[serde(default)]
    pub additional_info: AdditionalInfo,
    #[serde(default)]
    pub images: Vec<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, LeadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

impl NewLead {
    /// Check required fields and normalize the owner's contact details.
    ///
    /// # Errors
    ///
    /// Returns a [`LeadError`] naming the first field that fails.
    pub fn validate(mut self, now: DateTime<Utc>) -> Result<Self, LeadError> {
        self.owner_info.name = required(&self.owner_info.name, "owner name")?;
        self.owner_info.email = Email::parse(&self.owner_info.email)?.into_inner();
        self.owner_info.phone = required(&self.owner_info.phone, "owner phone")?;
        self.bike_details.brand = required(&self.bike_details.brand, "brand")?;
        self.bike_details.model = required(&self.bike_details.model, "model")?;

        let year = self.bike_details.year;
        if !(MIN_MODEL_YEAR..=now.year() + 1).contains(&year) {
            return Err(LeadError::InvalidYear(year));
        }
        if self.bike_details.expected_price.is_sign_negative() {
            return Err(LeadError::NegativePrice);
        }
        Ok(self)
    }
}

/// Filter for [`LeadList::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub status: Option<LeadStatus>,
    /// Case-insensitive match against owner name, brand, and model.
    #[serde(default)]
    pub search: Option<String>,
}

impl LeadFilter {
    fn matches(&self, lead: &LeadSubmission) -> bool {
        if self.status.is_some_and(|status| status != lead.status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    &lead.owner_info.name,
                    &lead.bike_details.brand,
                    &lead.bike_details.model,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }
}

/// Lead totals for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Number of brands reported in [`LeadAnalytics::top_brands`].
pub const TOP_BRANDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: usize,
}

/// Submission trends for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAnalytics {
    pub total_submissions: usize,
    /// Submissions in the current UTC calendar month.
    pub this_month: usize,
    /// Mean expected price rounded to a whole amount, zero with no leads.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub average_price: Decimal,
    /// Most submitted brands, highest count first. Ties keep the order in
    /// which the brands were first submitted.
    pub top_brands: Vec<BrandCount>,
}

/// The persisted collection of lead submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadList(Vec<LeadSubmission>);

impl LeadList {
    #[must_use]
    pub const fn new(leads: Vec<LeadSubmission>) -> Self {
        Self(leads)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LeadSubmission] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<LeadSubmission> {
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

    /// Store a validated lead as `pending` with a fresh id.
    pub fn create(&mut self, lead: NewLead, now: DateTime<Utc>) -> LeadSubmission {
        let mut id = LeadId::generate();
        while self.get(id.as_str()).is_some() {
            let millis = id.as_str().parse::<i64>().unwrap_or_default();
            id = LeadId::generate_after(millis);
        }

        let submission = LeadSubmission {
            id,
            owner_info: lead.owner_info,
            bike_details: lead.bike_details,
            additional_info: lead.additional_info,
            images: lead.images,
            submitted_at: now,
            status: LeadStatus::Pending,
        };
        self.0.push(submission.clone());
        submission
    }

    /// Leads matching `filter`, newest first.
    #[must_use]
    pub fn list(&self, filter: &LeadFilter) -> Vec<LeadSubmission> {
        let mut leads: Vec<LeadSubmission> = self
            .0
            .iter()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        leads
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LeadSubmission> {
        self.0.iter().find(|lead| lead.id == id)
    }

    /// Set the status of lead `id`. Returns the updated lead, or `None`
    /// when no such lead exists.
    pub fn set_status(&mut self, id: &str, status: LeadStatus) -> Option<LeadSubmission> {
        let lead = self.0.iter_mut().find(|lead| lead.id == id)?;
        lead.status = status;
        Some(lead.clone())
    }

    /// Delete lead `id`. Returns `false` when it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|lead| lead.id != id);
        self.0.len() != before
    }

    #[must_use]
    pub fn stats(&self) -> LeadStats {
        self.0.iter().fold(
            LeadStats {
                total: self.0.len(),
                ..LeadStats::default()
            },
            |mut stats, lead| {
                match lead.status {
                    LeadStatus::Pending => stats.pending += 1,
                    LeadStatus::Reviewed => stats.reviewed += 1,
                    LeadStatus::Approved => stats.approved += 1,
                    LeadStatus::Rejected => stats.rejected += 1,
                }
                stats
            },
        )
    }

    /// Trends over every lead, with "this month" taken relative to `now`.
    #[must_use]
    pub fn analytics(&self, now: DateTime<Utc>) -> LeadAnalytics {
        let this_month = self
            .0
            .iter()
            .filter(|lead| {
                lead.submitted_at.year() == now.year() && lead.submitted_at.month() == now.month()
            })
            .count();

        let average_price = if self.0.is_empty() {
            Decimal::ZERO
        } else {
            let total: Decimal = self.0.iter().map(|lead| lead.bike_details.expected_price).sum();
            (total / Decimal::from(self.0.len()))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };

        let mut top_brands: Vec<BrandCount> = Vec::new();
        for lead in &self.0 {
            let brand = &lead.bike_details.brand;
            match top_brands.iter_mut().find(|entry| entry.brand == *brand) {
                Some(entry) => entry.count += 1,
                None => top_brands.push(BrandCount {
                    brand: brand.clone(),
                    count: 1,
                }),
            }
        }
        top_brands.sort_by(|a, b| b.count.cmp(&a.count));
        top_brands.truncate(TOP_BRANDS);

        LeadAnalytics {
            total_submissions: self.0.len(),
            this_month,
            average_price,
            top_brands,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap()
    }

    fn new_lead(name: &str, brand: &str, model: &str) -> NewLead {
        serde_json::from_value(json!({
            "ownerInfo": {
                "name": name,
                "email": "Owner@Example.com",
                "phone": "+91 9000000000",
                "address": "Andheri, Mumbai"
            },
            "bikeDetails": {
                "brand": brand,
                "model": model,
                "year": 2019,
                "kmDriven": 18000,
                "fuelType": "Petrol",
                "registrationState": "MH",
                "expectedPrice": 145000.0
            },
            "additionalInfo": {"condition": "Good"}
        }))
        .unwrap()
    }

    #[test]
    fn test_new_lead_defaults() {
        let lead = new_lead("Ravi", "Honda", "Shine");
        assert_eq!(lead.bike_details.transmission, "Manual");
        assert_eq!(lead.bike_details.owners, 1);
        assert_eq!(lead.additional_info.urgency, "Normal");
        assert_eq!(lead.bike_details.expected_price, Decimal::new(145_000, 0));
    }

    #[test]
    fn test_numeric_fields_accept_form_text() {
        let lead: NewLead = serde_json::from_value(json!({
            "ownerInfo": {"name": "Ravi", "email": "ravi@example.com", "phone": "9000000000"},
            "bikeDetails": {
                "brand": "Bajaj",
                "model": "Pulsar 150",
                "year": "2020",
                "kmDriven": "15000",
                "expectedPrice": "65000.50"
            }
        }))
        .unwrap();
        assert_eq!(lead.bike_details.year, 2020);
        assert_eq!(lead.bike_details.km_driven, 15_000);
        assert_eq!(lead.bike_details.expected_price, Decimal::new(6_500_050, 2));

        // Stored back as numbers
        let stored = serde_json::to_value(&lead.bike_details).unwrap();
        assert_eq!(stored["kmDriven"], 15_000);
        assert_eq!(stored["expectedPrice"], 65_000.5);
    }

    #[test]
    fn test_blank_mileage_reads_as_zero_and_garbage_is_rejected() {
        let details: BikeDetails = serde_json::from_value(json!({
            "brand": "Hero", "model": "Splendor", "year": 2018,
            "kmDriven": "", "expectedPrice": 30000
        }))
        .unwrap();
        assert_eq!(details.km_driven, 0);

        let garbage = serde_json::from_value::<BikeDetails>(json!({
            "brand": "Hero", "model": "Splendor", "year": "twenty",
            "expectedPrice": 30000
        }));
        assert!(garbage.is_err());
    }

    #[test]
    fn test_validate_normalizes_email() {
        let lead = new_lead("  Ravi ", "Honda", "Shine").validate(now()).unwrap();
        assert_eq!(lead.owner_info.email, "owner@example.com");
        assert_eq!(lead.owner_info.name, "Ravi");
    }

    #[test]
    fn test_validate_rejects_missing_brand() {
        let result = new_lead("Ravi", " ", "Shine").validate(now());
        assert_eq!(result, Err(LeadError::MissingField("brand")));
    }

    #[test]
    fn test_validate_rejects_future_year() {
        let mut lead = new_lead("Ravi", "Honda", "Shine");
        lead.bike_details.year = 2031;
        assert_eq!(lead.validate(now()), Err(LeadError::InvalidYear(2031)));
    }

    #[test]
    fn test_create_assigns_pending_and_unique_ids() {
        let mut leads = LeadList::default();
        let a = leads.create(new_lead("Ravi", "Honda", "Shine"), now());
        let b = leads.create(new_lead("Asha", "TVS", "Jupiter"), now());
        assert_eq!(a.status, LeadStatus::Pending);
        assert_ne!(a.id, b.id);
        assert_eq!(leads.len(), 2);
    }

    #[test]
    fn test_set_status_twice_is_idempotent() {
        let mut leads = LeadList::default();
        let lead = leads.create(new_lead("Ravi", "Honda", "Shine"), now());
        let first = leads.set_status(lead.id.as_str(), LeadStatus::Approved).unwrap();
        let second = leads.set_status(lead.id.as_str(), LeadStatus::Approved).unwrap();
        assert_eq!(first, second);
        assert!(leads.set_status("missing", LeadStatus::Approved).is_none());
    }

    #[test]
    fn test_list_filters_by_status_and_search() {
        let mut leads = LeadList::default();
        let ravi = leads.create(new_lead("Ravi", "Royal Enfield", "Classic 350"), now());
        leads.create(new_lead("Asha", "TVS", "Jupiter"), now());
        leads.set_status(ravi.id.as_str(), LeadStatus::Reviewed);

        let by_status = leads.list(&LeadFilter {
            status: Some(LeadStatus::Reviewed),
            search: None,
        });
        assert_eq!(by_status.len(), 1);

        let by_search = leads.list(&LeadFilter {
            status: None,
            search: Some("jUPiter".to_owned()),
        });
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search.first().unwrap().owner_info.name, "Asha");
    }

    #[test]
    fn test_stats_counts_by_status() {
        let mut leads = LeadList::default();
        let a = leads.create(new_lead("Ravi", "Honda", "Shine"), now());
        leads.create(new_lead("Asha", "TVS", "Jupiter"), now());
        leads.set_status(a.id.as_str(), LeadStatus::Rejected);
        let stats = leads.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.rejected, 1);
    }

    fn lead_at(brand: &str, price: i64, at: DateTime<Utc>) -> LeadSubmission {
        let mut lead = new_lead("Ravi", brand, "Any");
        lead.bike_details.expected_price = Decimal::new(price, 0);
        let mut leads = LeadList::default();
        leads.create(lead, at)
    }

    #[test]
    fn test_analytics_of_no_leads() {
        let analytics = LeadList::default().analytics(now());
        assert_eq!(analytics, LeadAnalytics::default());
        assert_eq!(analytics.average_price, Decimal::ZERO);
    }

    #[test]
    fn test_analytics_counts_current_month_only() {
        let last_of_feb = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap();
        let first_of_march = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let march_last_year = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let leads = LeadList::new(vec![
            lead_at("Honda", 100, last_of_feb),
            lead_at("Honda", 100, first_of_march),
            lead_at("Honda", 100, march_last_year),
        ]);

        let analytics = leads.analytics(now());
        assert_eq!(analytics.total_submissions, 3);
        assert_eq!(analytics.this_month, 1);
    }

    #[test]
    fn test_analytics_average_rounds_half_up() {
        let leads = LeadList::new(vec![
            lead_at("Honda", 100_000, now()),
            lead_at("TVS", 100_001, now()),
        ]);
        assert_eq!(leads.analytics(now()).average_price, Decimal::new(100_001, 0));
    }

    #[test]
    fn test_analytics_top_five_brands() {
        let brands = [
            "Bajaj", "TVS", "Honda", "TVS", "Yamaha", "KTM", "Honda", "TVS", "Suzuki", "Hero",
        ];
        let leads = LeadList::new(brands.iter().map(|b| lead_at(b, 1, now())).collect());

        let top: Vec<(String, usize)> = leads
            .analytics(now())
            .top_brands
            .into_iter()
            .map(|entry| (entry.brand, entry.count))
            .collect();
        assert_eq!(
            top,
            vec![
                ("TVS".to_owned(), 3),
                ("Honda".to_owned(), 2),
                ("Bajaj".to_owned(), 1),
                ("Yamaha".to_owned(), 1),
                ("KTM".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn test_remove() {
        let mut leads = LeadList::default();
        let a = leads.create(new_lead("Ravi", "Honda", "Shine"), now());
        assert!(leads.remove(a.id.as_str()));
        assert!(!leads.remove(a.id.as_str()));
    }
}
