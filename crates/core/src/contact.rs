//! Contact-form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ContactId, ContactStatus, Email};

/// Errors from validating a [`ContactForm`]. The messages are shown to the
/// visitor as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Name, email, and message are required")]
    MissingFields,

    #[error("Please provide a valid email address")]
    InvalidEmail,
}

/// The contact form as posted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: ContactStatus,
}

impl ContactForm {
    /// Validate the form and build a `new` submission from it.
    ///
    /// # Errors
    ///
    /// [`ContactError::MissingFields`] when name, email, or message is
    /// blank; [`ContactError::InvalidEmail`] when the email does not look
    /// like `local@domain.tld`.
    pub fn into_submission(self, now: DateTime<Utc>) -> Result<ContactSubmission, ContactError> {
        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || self.email.trim().is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }
        let email = Email::parse(&self.email).map_err(|_| ContactError::InvalidEmail)?;

        Ok(ContactSubmission {
            id: ContactId::generate(),
            name: name.to_owned(),
            email: email.into_inner(),
            phone: self.phone.as_deref().map(str::trim).unwrap_or_default().to_owned(),
            message: message.to_owned(),
            timestamp: now,
            status: ContactStatus::New,
        })
    }
}

/// Contact counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub new: usize,
    pub read: usize,
    pub replied: usize,
}

/// The persisted collection of contact submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactList(Vec<ContactSubmission>);

impl ContactList {
    pub fn push(&mut self, submission: ContactSubmission) {
        self.0.push(submission);
    }

    /// All submissions, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<ContactSubmission> {
        let mut all = self.0.clone();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all
    }

    pub fn set_status(&mut self, id: &str, status: ContactStatus) -> Option<ContactSubmission> {
        let submission = self.0.iter_mut().find(|c| c.id == id)?;
        submission.status = status;
        Some(submission.clone())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c.id != id);
        self.0.len() != before
    }

    #[must_use]
    pub fn stats(&self) -> ContactStats {
        let count = |status| self.0.iter().filter(|c| c.status == status).count();
        ContactStats {
            total: self.0.len(),
            new: count(ContactStatus::New),
            read: count(ContactStatus::Read),
            replied: count(ContactStatus::Replied),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: Some(" 98765 43210 ".to_owned()),
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_submission_is_normalized() {
        let submission = form(" Meera ", " Meera@Mail.COM ", " Is my Pulsar eligible? ")
            .into_submission(Utc::now())
            .unwrap();
        assert_eq!(submission.name, "Meera");
        assert_eq!(submission.email, "meera@mail.com");
        assert_eq!(submission.phone, "98765 43210");
        assert_eq!(submission.status, ContactStatus::New);
        assert!(submission.id.as_str().starts_with("contact_"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            form("Meera", "meera@mail.com", "   ").into_submission(Utc::now()),
            Err(ContactError::MissingFields)
        );
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            form("Meera", "meera@mail", "hi").into_submission(Utc::now()),
            Err(ContactError::InvalidEmail)
        );
    }

    #[test]
    fn test_status_and_stats() {
        let mut list = ContactList::default();
        let submission = form("Meera", "meera@mail.com", "hi")
            .into_submission(Utc::now())
            .unwrap();
        let id = submission.id.clone();
        list.push(submission);
        list.set_status(id.as_str(), ContactStatus::Replied);
        let stats = list.stats();
        assert_eq!(stats.replied, 1);
        assert_eq!(stats.new, 0);
        assert!(list.remove(id.as_str()));
        assert!(list.list().is_empty());
    }
}
