//! Newtype IDs for type-safe entity references.
//!
//! Every stored record is keyed by a string: section ids double as
//! stable lookup keys ("header", "footer"), while leads and contact
//! submissions get generated ids. Use the `define_id!` macro to create
//! wrappers that prevent mixing ids from different collections.

use chrono::Utc;
use rand::Rng;

/// Characters used for the random suffix of generated contact ids.
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix of generated contact ids.
const CONTACT_SUFFIX_LEN: usize = 9;

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use bikesdeal_core::define_id;
/// define_id!(PageId);
/// define_id!(BannerId);
///
/// let page = PageId::new("home");
/// let banner = BannerId::new("home");
///
/// // These are different types, so this won't compile:
/// // let _: PageId = banner;
/// assert_eq!(page.as_str(), banner.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(SectionId);
define_id!(LeadId);
define_id!(ContactId);

impl SectionId {
    /// Generate an id for an admin-created section (epoch milliseconds).
    ///
    /// Callers that need uniqueness within a collection should check for
    /// collisions and bump with [`SectionId::generate_after`].
    #[must_use]
    pub fn generate() -> Self {
        Self(Utc::now().timestamp_millis().to_string())
    }

    /// Generate an id strictly greater than `millis`, for collision retries.
    #[must_use]
    pub fn generate_after(millis: i64) -> Self {
        Self((millis + 1).to_string())
    }
}

impl LeadId {
    /// Generate an id for a new lead submission (epoch milliseconds).
    #[must_use]
    pub fn generate() -> Self {
        Self(Utc::now().timestamp_millis().to_string())
    }

    /// Generate an id strictly greater than `millis`, for collision retries.
    #[must_use]
    pub fn generate_after(millis: i64) -> Self {
        Self((millis + 1).to_string())
    }
}

impl ContactId {
    /// Generate an id of the form `contact_<millis>_<9 base36 chars>`.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..CONTACT_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.random_range(0..BASE36.len());
                char::from(BASE36.get(idx).copied().unwrap_or(b'0'))
            })
            .collect();
        Self(format!(
            "contact_{}_{suffix}",
            Utc::now().timestamp_millis()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_roundtrips_through_json() {
        let id = SectionId::new("header");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"header\"");
    }

    #[test]
    fn test_generated_section_id_is_numeric() {
        let id = SectionId::generate();
        assert!(id.as_str().parse::<i64>().is_ok());
    }

    #[test]
    fn test_generate_after_bumps_millis() {
        assert_eq!(SectionId::generate_after(41).as_str(), "42");
    }

    #[test]
    fn test_contact_id_format() {
        let id = ContactId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first().copied(), Some("contact"));
        assert!(parts.get(1).is_some_and(|p| p.parse::<i64>().is_ok()));
        assert!(parts.get(2).is_some_and(|p| {
            p.len() == CONTACT_SUFFIX_LEN
                && p.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        }));
    }

    #[test]
    fn test_id_compares_with_str() {
        let id = LeadId::new("1700000000000");
        assert!(id == "1700000000000");
    }
}
