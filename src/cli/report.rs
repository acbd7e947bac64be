//! CLI commands for reports
//!
//! Overview, trend, chart and yearly reports comparing targets with actual
//! sales.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{SalesError, SalesResult};
use crate::models::{CalendarDate, DateRange, Granularity, Period};
use crate::reports::Trend;
use crate::services::{PeriodService, Reconciler};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Target, actual and achievement rate for a period
    Overview {
        /// Period text, defaults to the current period
        #[arg(short, long)]
        period: Option<String>,

        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },

    /// Per-day target and actual series over a date range
    Trend {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: CalendarDate,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: CalendarDate,

        /// Which targets to compare against: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Chart series for a period (months are grouped by week of month)
    Chart {
        /// Period text, defaults to the current period
        #[arg(short, long)]
        period: Option<String>,

        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month by month performance for a year
    Year {
        /// Calendar year, defaults to the current year
        year: Option<i32>,
    },

    /// List the periods that can be selected
    Periods {
        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SalesResult<()> {
    let period_service = PeriodService::new(settings);
    let reconciler = Reconciler::new(storage);

    match cmd {
        ReportCommands::Overview {
            period,
            granularity,
        } => {
            let period = period_service.parse_or_current(period.as_deref(), granularity)?;
            let overview = reconciler.overview(&period)?;
            print!(
                "{}",
                overview.format_terminal(&period.label(), &settings.currency_unit)
            );
        }

        ReportCommands::Trend {
            start,
            end,
            granularity,
            output,
        } => {
            let range = DateRange::new(start, end)?;
            let trend = reconciler.trend(
                granularity.unwrap_or(settings.default_granularity),
                &range,
            )?;
            emit_trend(&trend, output, &format!("Trend: {}", range))?;
        }

        ReportCommands::Chart {
            period,
            granularity,
            output,
        } => {
            let period = period_service.parse_or_current(period.as_deref(), granularity)?;
            let chart = reconciler.chart(&period)?;
            emit_trend(&chart, output, &format!("Chart: {}", period.label()))?;
        }

        ReportCommands::Year { year } => {
            let year = year.unwrap_or_else(|| period_service.today().year());
            let summary = reconciler.year_summary(year)?;
            print!("{}", summary.format_terminal());
        }

        ReportCommands::Periods { granularity } => {
            let granularity = granularity.unwrap_or(settings.default_granularity);
            for period in period_service.upcoming(granularity)? {
                println!("{}", period_label(&period));
            }
        }
    }

    Ok(())
}

fn period_label(period: &Period) -> String {
    format!("{:<26} {}", period.label(), period)
}

/// Print a trend or export it to CSV
fn emit_trend(trend: &Trend, output: Option<PathBuf>, title: &str) -> SalesResult<()> {
    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            SalesError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        trend.export_csv(BufWriter::new(file))?;
        println!("Trend exported to: {}", path.display());
    } else {
        println!("{}", title);
        print!("{}", trend.format_terminal());
    }

    Ok(())
}
