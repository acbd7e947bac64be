use anyhow::Result;
use clap::{Parser, Subcommand};

use stepup_cli::cli::{handle_record_command, handle_report_command, handle_target_command};
use stepup_cli::config::{paths::StepupPaths, settings::Settings};
use stepup_cli::display::format_audit_entries;
use stepup_cli::logging::init_tracing;
use stepup_cli::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "stepup",
    version,
    about = "Sales target and record tracking",
    long_about = "StepUp tracks sales targets for months, weeks and days, records \
                  actual daily sales, and reports achievement rates for any period."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sales target commands
    #[command(subcommand)]
    Target(stepup_cli::cli::TargetCommands),

    /// Actual sales commands
    #[command(subcommand)]
    Record(stepup_cli::cli::RecordCommands),

    /// Reports comparing targets with actual sales
    #[command(subcommand)]
    Report(stepup_cli::cli::ReportCommands),

    /// Show recent changes to targets and records
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = StepupPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let Some(command) = cli.command else {
        println!("StepUp - sales target and record tracking");
        println!();
        println!("Run 'stepup --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing StepUp at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized.");
            }
            println!();
            println!("Run 'stepup target set <amount>' to set this month's target.");
        }
        Commands::Config => {
            println!("StepUp Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Default period type: {}", settings.default_granularity);
            println!("  History order:       {:?}", settings.history_order);
            println!("  Log filter:          {}", settings.log_filter);
            println!("  Currency unit:       {}", settings.currency_unit);
            println!("  Upcoming months:     {}", settings.upcoming_months);
        }
        Commands::Target(cmd) => {
            handle_target_command(&Storage::open(paths)?, &settings, cmd)?;
        }
        Commands::Record(cmd) => {
            handle_record_command(&Storage::open(paths)?, &settings, cmd)?;
        }
        Commands::Report(cmd) => {
            handle_report_command(&Storage::open(paths)?, &settings, cmd)?;
        }
        Commands::Audit { count } => {
            let storage = Storage::open(paths)?;
            let entries = storage.audit().read_recent(count)?;
            println!("{}", format_audit_entries(&entries));
        }
    }

    Ok(())
}
