//! Soft-delete status shared by stored entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a stored row is in effect
///
/// Rows are never physically removed: superseding flips the status and
/// keeps the row for history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Superseded,
}

impl EntryStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Superseded => write!(f, "Superseded"),
        }
    }
}
