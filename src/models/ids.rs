//! Strongly-typed ID wrappers for stored entities
//!
//! Using newtype wrappers prevents accidentally mixing up target and record
//! IDs at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether a user-typed reference names this ID
            ///
            /// Accepts the full UUID or the short display form.
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let bare = reference.strip_prefix($display_prefix).unwrap_or(reference);
                !bare.is_empty() && self.0.to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TargetId, "tgt-");
define_id!(RecordId, "rec-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_prefix() {
        let id = TargetId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("tgt-"));
        assert_eq!(shown.len(), 12);
    }

    #[test]
    fn test_short_reference_matches() {
        let id = RecordId::new();
        let shown = id.to_string();
        assert!(id.matches(&shown));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(!id.matches("rec-"));
        assert!(!RecordId::new().matches(&shown));
    }

    #[test]
    fn test_parse_full_uuid() {
        let id = TargetId::new();
        let parsed: TargetId = id.as_uuid().to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
