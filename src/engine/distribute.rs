//! Even distribution of an amount across days

use crate::error::{SalesError, SalesResult};
use crate::models::{CalendarDate, DailyAmount};

/// Split `total` across `dates`
///
/// Every day gets `total / n`; the remainder goes entirely to the first
/// date, so the slices always sum to `total` exactly.
pub fn distribute(total: u64, dates: &[CalendarDate]) -> SalesResult<Vec<DailyAmount>> {
    let (first, rest) = dates.split_first().ok_or(SalesError::EmptyRange)?;

    let count = dates.len() as u64;
    let per_day = total / count;
    let remainder = total - per_day * count;

    let mut slices = Vec::with_capacity(dates.len());
    slices.push(DailyAmount::new(*first, per_day + remainder));
    slices.extend(rest.iter().map(|date| DailyAmount::new(*date, per_day)));
    Ok(slices)
}

/// Sum amounts, failing instead of wrapping when the total exceeds `u64`
pub fn checked_sum<I>(amounts: I) -> SalesResult<u64>
where
    I: IntoIterator<Item = u64>,
{
    amounts.into_iter().try_fold(0u64, |total, amount| {
        total.checked_add(amount).ok_or_else(SalesError::amount_overflow)
    })
}

/// Sum a daily series back into a period total
pub fn aggregate_total(daily: &[DailyAmount]) -> SalesResult<u64> {
    checked_sum(daily.iter().map(|entry| entry.amount))
}
