//! Sales record CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_record_list;
use crate::error::SalesResult;
use crate::models::{CalendarDate, Granularity};
use crate::services::{PeriodService, RecordService};
use crate::storage::Storage;

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Record the sales of one day
    Add {
        /// Sales amount
        amount: u64,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<CalendarDate>,
    },

    /// Record a total for a week or month, spread across its days
    Period {
        /// Total sales amount for the period
        amount: u64,
        /// Period text, defaults to the current period
        #[arg(short, long)]
        period: Option<String>,
        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },

    /// Change the amount recorded for a day
    Edit {
        /// Day (YYYY-MM-DD)
        date: CalendarDate,
        /// New sales amount
        amount: u64,
    },

    /// Remove the records of one or more days
    #[command(alias = "rm")]
    Remove {
        /// Days (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<CalendarDate>,
        /// Why the records are being removed
        #[arg(short, long, default_value = "removed")]
        reason: String,
    },

    /// List the records of a period
    List {
        /// Period text, defaults to the current period
        #[arg(short, long)]
        period: Option<String>,
        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },
}

/// Handle a record command
pub fn handle_record_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecordCommands,
) -> SalesResult<()> {
    let service = RecordService::new(storage);
    let period_service = PeriodService::new(settings);

    match cmd {
        RecordCommands::Add { amount, date } => {
            let date = date.unwrap_or_else(|| period_service.today());
            let record = service.record_day(date, amount)?;
            println!(
                "Recorded {} for {}",
                settings.format_amount(record.amount),
                record.date
            );
        }

        RecordCommands::Period {
            amount,
            period,
            granularity,
        } => {
            let period = period_service.parse_or_current(period.as_deref(), granularity)?;
            let records = service.record_period(&period, amount)?;
            println!(
                "Recorded {} for {} across {} days",
                settings.format_amount(amount),
                period.label(),
                records.len()
            );
        }

        RecordCommands::Edit { date, amount } => {
            let record = service.edit_amount(date, amount)?;
            println!(
                "Updated {} to {}",
                record.date,
                settings.format_amount(record.amount)
            );
        }

        RecordCommands::Remove { dates, reason } => {
            let count = service.remove_dates(&dates, &reason)?;
            println!("Removed {} record(s)", count);
        }

        RecordCommands::List {
            period,
            granularity,
        } => {
            let period = period_service.parse_or_current(period.as_deref(), granularity)?;
            let records = service.list(&period.range()?)?;
            println!("Sales for {}", period.label());
            println!("{}", format_record_list(&records, settings)?);
        }
    }

    Ok(())
}
