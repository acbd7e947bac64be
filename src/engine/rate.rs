//! Achievement rate calculation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Achievement rate as a percentage rounded to one decimal
///
/// Returns 0 when `target` is zero. Never NaN or infinite.
pub fn rate(amount: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    let percent = amount as f64 / target as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

/// Coarse classification of an achievement rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementBand {
    /// Below 85%
    Low,
    /// 85% up to (not including) 100%
    Mid,
    /// Target met or exceeded
    High,
}

impl AchievementBand {
    pub fn from_rate(rate: f64) -> Self {
        if rate < 85.0 {
            Self::Low
        } else if rate < 100.0 {
            Self::Mid
        } else {
            Self::High
        }
    }
}

impl fmt::Display for AchievementBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Mid => write!(f, "mid"),
            Self::High => write!(f, "high"),
        }
    }
}
