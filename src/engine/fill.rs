//! Zero-filling of sparse daily series

use std::collections::HashMap;

use crate::models::{CalendarDate, DailyAmount};

/// Align a sparse series to `full_dates`, using zero for missing days
///
/// The output has exactly one entry per element of `full_dates`, in the
/// same order. Entries of `sparse` outside `full_dates` are dropped. When
/// `sparse` repeats a date the last entry wins.
pub fn fill(full_dates: &[CalendarDate], sparse: &[DailyAmount]) -> Vec<DailyAmount> {
    let lookup: HashMap<CalendarDate, u64> =
        sparse.iter().map(|entry| (entry.date, entry.amount)).collect();

    full_dates
        .iter()
        .map(|date| DailyAmount::new(*date, lookup.get(date).copied().unwrap_or(0)))
        .collect()
}
