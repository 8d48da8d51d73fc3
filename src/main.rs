use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use spendscope::cli::{
    handle_categories_command, handle_export_command, handle_periods_command,
    handle_summary_command, handle_transactions_command, handle_trend_command, CategoriesArgs,
    ExportArgs, PeriodsArgs, SummaryArgs, TransactionsArgs, TrendArgs,
};
use spendscope::config::{Settings, SpendscopePaths};
use spendscope::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "spendscope",
    version,
    about = "Period analytics for bank transaction exports",
    long_about = "spendscope reads a bank or card transaction export and shows which \
                  months or weeks it covers, income and expense totals for a period, \
                  where the money went by category, and the transactions themselves."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the months or weeks the data covers, most recent first
    Periods(PeriodsArgs),

    /// Show income, expenses and the category breakdown for a period
    #[command(alias = "report")]
    Summary(SummaryArgs),

    /// List a period's transactions a page at a time
    #[command(alias = "txn")]
    Transactions(TransactionsArgs),

    /// Show one category's spending month by month
    Trend(TrendArgs),

    /// List the categories used in a file
    Categories(CategoriesArgs),

    /// Export a period's snapshot as JSON, YAML or CSV
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = SpendscopePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Periods(args)) => handle_periods_command(&settings, args)?,
        Some(Commands::Summary(args)) => handle_summary_command(&settings, args)?,
        Some(Commands::Transactions(args)) => handle_transactions_command(&settings, args)?,
        Some(Commands::Trend(args)) => handle_trend_command(&settings, args)?,
        Some(Commands::Categories(args)) => handle_categories_command(&settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&paths, &settings, args)?,
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }

            println!("spendscope Configuration");
            println!("========================");
            println!("Config directory:  {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Default granularity: {}", settings.default_granularity);
            println!("  Classification:      {}", settings.classification);
            println!("  Page size:           {}", settings.page_size);
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
        }
        None => {
            println!("spendscope - Period analytics for bank transaction exports");
            println!();
            println!("Run 'spendscope --help' for usage information.");
            println!("Run 'spendscope periods <FILE>' to see what a file covers.");
        }
    }

    Ok(())
}
