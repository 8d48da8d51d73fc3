//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Every command reads one
//! transaction file; the views that scope to a period share
//! [`SelectionArgs`].

pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

use std::path::Path;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::{Granularity, PeriodMode, Transaction};
use crate::services::{ImportService, Selection};

pub use category::{handle_categories_command, CategoriesArgs};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use report::{
    handle_periods_command, handle_summary_command, handle_trend_command, PeriodsArgs,
    SummaryArgs, TrendArgs,
};
pub use transaction::{handle_transactions_command, TransactionsArgs};

/// Date format accepted by `--from` / `--to`
pub const CLI_DATE_FORMAT: &str = "%Y-%m-%d";

/// Period mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Calendar months, keys like 2024-07
    Monthly,
    /// ISO weeks, keys like 2024-27
    Weekly,
    /// Explicit --from/--to range
    Custom,
    /// Every dated transaction
    All,
}

impl From<ModeArg> for PeriodMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Monthly => PeriodMode::Monthly,
            ModeArg::Weekly => PeriodMode::Weekly,
            ModeArg::Custom => PeriodMode::Custom,
            ModeArg::All => PeriodMode::All,
        }
    }
}

/// Granularity options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Monthly,
    Weekly,
}

impl From<GranularityArg> for Granularity {
    fn from(granularity: GranularityArg) -> Self {
        match granularity {
            GranularityArg::Monthly => Granularity::Monthly,
            GranularityArg::Weekly => Granularity::Weekly,
        }
    }
}

/// Period selection flags shared by the period views
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Period mode (defaults to custom with --from/--to, to the configured
    /// granularity with --period, otherwise all)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Period key (e.g., "2024-07") or "latest" for the most recent period
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub period: Option<String>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<String>,
}

impl SelectionArgs {
    /// Turn the flags into a mode and selection
    pub fn resolve(&self, settings: &Settings) -> SpendscopeResult<(PeriodMode, Selection)> {
        let start = self.from.as_deref().map(parse_date_arg).transpose()?;
        let end = self.to.as_deref().map(parse_date_arg).transpose()?;
        let has_range = start.is_some() || end.is_some();

        let mode: PeriodMode = match self.mode {
            Some(mode) => mode.into(),
            None if has_range => PeriodMode::Custom,
            None if self.period.is_some() => settings.default_granularity.into(),
            None => PeriodMode::All,
        };

        let selection = match &self.period {
            Some(key) => Selection::Key(key.clone()),
            None if has_range => Selection::Range { start, end },
            None => Selection::Unset,
        };

        Ok((mode, selection))
    }
}

/// Parse a `--from` / `--to` date
pub fn parse_date_arg(s: &str) -> SpendscopeResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), CLI_DATE_FORMAT).map_err(|_| {
        SpendscopeError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Read a transaction file, reporting skipped or flagged rows on stderr
pub fn load_transactions(path: &Path, settings: &Settings) -> SpendscopeResult<Vec<Transaction>> {
    let result = ImportService::new(Some(&settings.date_format)).load_file(path)?;
    let report = result.report;

    if report.excluded_payments > 0 {
        eprintln!(
            "Note: {} payment(s) between accounts were left out.",
            report.excluded_payments
        );
    }
    if report.is_clean() {
        return Ok(result.transactions);
    }

    if report.invalid_dates > 0 {
        eprintln!(
            "Note: {} row(s) have an unreadable date and are excluded from every period.",
            report.invalid_dates
        );
    }
    if report.invalid_amounts > 0 {
        eprintln!(
            "Note: {} row(s) have an unreadable amount and are counted as zero.",
            report.invalid_amounts
        );
    }
    if report.unreadable_rows > 0 {
        eprintln!(
            "Note: {} row(s) could not be read and were skipped.",
            report.unreadable_rows
        );
    }

    Ok(result.transactions)
}
