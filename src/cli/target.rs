//! Target CLI commands
//!
//! Implements CLI commands for saving and maintaining period targets.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_target_details, format_target_list};
use crate::error::SalesResult;
use crate::models::{BucketOrder, Granularity};
use crate::services::{PeriodService, TargetService};
use crate::storage::Storage;

/// Target subcommands
#[derive(Subcommand)]
pub enum TargetCommands {
    /// Set the target for a period
    Set {
        /// Target amount
        amount: u64,
        /// Period ("2025년 5월", "2025-05", "2025-05-12 ~ 2025-05-18",
        /// "2025-W20", "2025-05-12", "current", "next")
        #[arg(short, long)]
        period: Option<String>,
        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,
        /// Replace an existing target starting on the same date
        #[arg(long)]
        overwrite: bool,
    },

    /// List active targets
    List {
        /// Only show targets of this type
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },

    /// Show a target with its daily distribution
    Show {
        /// Target ID (full or short form)
        id: String,
    },

    /// Change the amount of a target
    Edit {
        /// Target ID (full or short form)
        id: String,
        /// New target amount
        amount: u64,
    },

    /// Remove a target
    #[command(alias = "rm")]
    Remove {
        /// Target ID (full or short form)
        id: String,
        /// Why the target is being removed
        #[arg(short, long, default_value = "removed")]
        reason: String,
    },

    /// Targets with the sales achieved against each
    History {
        /// Period type: month, week or day
        #[arg(short, long)]
        granularity: Option<Granularity>,
        /// List the oldest target first
        #[arg(long)]
        oldest_first: bool,
    },
}

/// Handle a target command
pub fn handle_target_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TargetCommands,
) -> SalesResult<()> {
    let service = TargetService::new(storage);
    let period_service = PeriodService::new(settings);

    match cmd {
        TargetCommands::Set {
            amount,
            period,
            granularity,
            overwrite,
        } => {
            let period = period_service.parse_or_current(period.as_deref(), granularity)?;

            let target = if overwrite {
                service.overwrite(period, amount)?
            } else {
                match service.set(period, amount) {
                    Ok(target) => target,
                    Err(e) if e.is_duplicate_target() => {
                        eprintln!("A target already starts on the same date as {}.", period.label());
                        eprintln!("Re-run with --overwrite to replace it.");
                        return Err(e);
                    }
                    Err(e) => return Err(e),
                }
            };

            println!(
                "Set target for {}: {} ({})",
                period.label(),
                settings.format_amount(target.total_amount),
                target.id
            );
        }

        TargetCommands::List { granularity } => {
            let targets = service.list(granularity)?;
            println!("{}", format_target_list(&targets, settings));
            if targets.is_empty() {
                println!();
                println!("Use 'stepup target set <amount> --period <period>' to create a target.");
            }
        }

        TargetCommands::Show { id } => {
            let target = service.get(&id)?;
            print!("{}", format_target_details(&target, settings));
        }

        TargetCommands::Edit { id, amount } => {
            let target = service.edit_amount(&id, amount)?;
            println!(
                "Updated target for {}: {} ({})",
                target.period.label(),
                settings.format_amount(target.total_amount),
                target.id
            );
        }

        TargetCommands::Remove { id, reason } => {
            let target = service.remove(&id, &reason)?;
            println!("Removed target for {} ({})", target.period.label(), target.id);
        }

        TargetCommands::History {
            granularity,
            oldest_first,
        } => {
            let order = if oldest_first {
                BucketOrder::Chronological
            } else {
                settings.history_order
            };
            let history = service.history(
                granularity.unwrap_or(settings.default_granularity),
                order,
            )?;
            print!("{}", history.format_terminal());
        }
    }

    Ok(())
}
