//! Sales record model
//!
//! One active record per day holds the actual sales amount for that day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::DailyAmount;
use super::date::CalendarDate;
use super::ids::RecordId;
use super::status::EntryStatus;

/// Actual recorded sales for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: RecordId,
    pub date: CalendarDate,
    pub amount: u64,
    #[serde(default)]
    pub status: EntryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersede_reason: Option<String>,
}

impl SalesRecord {
    pub fn new(date: CalendarDate, amount: u64) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            date,
            amount,
            status: EntryStatus::Active,
            created_at: now,
            updated_at: now,
            superseded_at: None,
            supersede_reason: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn set_amount(&mut self, amount: u64) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Mark this record inactive
    pub fn supersede(&mut self, reason: impl Into<String>) {
        let now = Utc::now();
        self.status = EntryStatus::Superseded;
        self.superseded_at = Some(now);
        self.supersede_reason = Some(reason.into());
        self.updated_at = now;
    }

    pub fn as_daily(&self) -> DailyAmount {
        DailyAmount::new(self.date, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = SalesRecord::new("2025-05-12".parse().unwrap(), 12_000);
        assert!(record.is_active());
        assert_eq!(record.as_daily().amount, 12_000);
    }

    #[test]
    fn test_set_amount_touches_updated_at() {
        let mut record = SalesRecord::new("2025-05-12".parse().unwrap(), 12_000);
        let before = record.updated_at;
        record.set_amount(15_000);
        assert_eq!(record.amount, 15_000);
        assert!(record.updated_at >= before);
    }

    #[test]
    fn test_supersede() {
        let mut record = SalesRecord::new("2025-05-12".parse().unwrap(), 12_000);
        record.supersede("entered twice");
        assert!(!record.is_active());
        assert_eq!(record.supersede_reason.as_deref(), Some("entered twice"));
    }
}
