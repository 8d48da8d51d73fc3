//! CLI commands for reports
//!
//! Provides the period listing, the summary with its category breakdown,
//! and the per-category monthly trend.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use super::{load_transactions, GranularityArg, SelectionArgs};
use crate::config::Settings;
use crate::display::report::{format_money, format_percentage, separator};
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::Granularity;
use crate::reports::{CategoryTrend, SpendingReport, SummaryReport};
use crate::services::period::format_key_label;
use crate::services::{categories_in, AnalyticsEngine, PeriodService};

/// Arguments for `periods`
#[derive(Args, Debug)]
pub struct PeriodsArgs {
    /// Transaction file (CSV or JSON)
    pub file: PathBuf,

    /// Period granularity (defaults to the configured one)
    #[arg(short = 'm', long = "mode", value_enum)]
    pub granularity: Option<GranularityArg>,

    /// Show a readable label next to each key
    #[arg(short, long)]
    pub labels: bool,
}

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Transaction file (CSV or JSON)
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Show top N categories only
    #[arg(long)]
    pub top: Option<usize>,

    /// Export the category breakdown to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `trend`
#[derive(Args, Debug)]
pub struct TrendArgs {
    /// Transaction file (CSV or JSON)
    pub file: PathBuf,

    /// Category to chart
    #[arg(short, long)]
    pub category: String,
}

/// List the selectable period keys, most recent first
pub fn handle_periods_command(settings: &Settings, args: PeriodsArgs) -> SpendscopeResult<()> {
    let transactions = load_transactions(&args.file, settings)?;
    let granularity: Granularity = args
        .granularity
        .map(Into::into)
        .unwrap_or(settings.default_granularity);

    let periods = PeriodService::new(&transactions);
    let keys = periods.available_periods(granularity);

    if keys.is_empty() {
        println!("No dated transactions found.");
        return Ok(());
    }

    for key in &keys {
        if args.labels {
            println!("{:<10} {}", key, format_key_label(key, granularity));
        } else {
            println!("{}", key);
        }
    }

    Ok(())
}

/// Show totals and the category breakdown for a period
pub fn handle_summary_command(settings: &Settings, args: SummaryArgs) -> SpendscopeResult<()> {
    let transactions = load_transactions(&args.file, settings)?;
    let (mode, selection) = args.selection.resolve(settings)?;

    let snapshot = AnalyticsEngine::from_settings(settings).run(&transactions, mode, &selection)?;

    let summary = SummaryReport::from_snapshot(&snapshot);
    let spending = SpendingReport::from_snapshot(&snapshot);

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            SpendscopeError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        spending.export_csv(&mut writer)?;
        println!("Spending report exported to: {}", path.display());
        return Ok(());
    }

    println!("{}", summary.format_terminal(&settings.currency_symbol));

    if let Some(n) = args.top {
        println!("Top {} Categories: {}\n", n, spending.period_label);
        println!("{:<28} {:>14} {:>7}", "Category", "Amount", "%");
        println!("{}", separator(51));

        for stat in spending.top_categories(n) {
            println!(
                "{:<28} {:>14} {:>7}",
                stat.category,
                format_money(stat.total, &settings.currency_symbol),
                format_percentage(stat.percent)
            );
        }
    } else {
        println!("{}", spending.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Show a category's spending month by month
pub fn handle_trend_command(settings: &Settings, args: TrendArgs) -> SpendscopeResult<()> {
    let transactions = load_transactions(&args.file, settings)?;
    let trend = CategoryTrend::generate(&transactions, &args.category);

    println!("{}", trend.format_terminal(&settings.currency_symbol));

    if trend.is_empty() {
        let known = categories_in(&transactions);
        if !known.is_empty() {
            println!("Categories in this file: {}", known.join(", "));
        }
    }

    Ok(())
}
