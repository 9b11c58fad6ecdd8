//! Identifier types
//!
//! Every identifier is a UUIDv7, so identifiers created later sort after
//! identifiers created earlier. The resolver relies on the total order of
//! [`ClaimId`] to break similarity and confidence ties deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(u128);

        impl $name {
            /// Generate a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Create an identifier from a raw u128 value
            ///
            /// Used by tests and storage adapters that need stable identifiers.
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid {} string: {}", stringify!($name), e))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier of a document within a job
    DocumentId
);

uuid_identifier!(
    /// Unique identifier of an extracted claim
    ClaimId
);

uuid_identifier!(
    /// Unique identifier of a pipeline job
    JobId
);

uuid_identifier!(
    /// Unique identifier of a summary report
    ReportId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_ordering() {
        let id1 = ClaimId::from_value(1000);
        let id2 = ClaimId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_claim_id_chronological() {
        let id1 = ClaimId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_display_and_parse() {
        let id = DocumentId::new();
        let id_str = id.to_string();

        assert_eq!(id_str.len(), 36);
        let parsed: DocumentId = id_str.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_string() {
        assert!("not-a-valid-uuid".parse::<JobId>().is_err());
        assert!("".parse::<ReportId>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = ClaimId::from_value(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
