//! Sales record display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::config::settings::Settings;
use crate::engine::checked_sum;
use crate::error::SalesResult;
use crate::models::SalesRecord;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

/// Format records as a table with a total line
pub fn format_record_list(records: &[SalesRecord], settings: &Settings) -> SalesResult<String> {
    if records.is_empty() {
        return Ok("No sales recorded.".to_string());
    }

    let rows = records.iter().map(|record| RecordRow {
        date: record.date.to_string(),
        amount: settings.format_amount(record.amount),
        updated: record.updated_at.format("%Y-%m-%d %H:%M").to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    let total = checked_sum(records.iter().map(|r| r.amount))?;
    Ok(format!("{}\nTotal: {}", table, settings.format_amount(total)))
}
