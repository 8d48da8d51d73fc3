//! CLI command for data export
//!
//! Writes the analytics snapshot of a period in one of several formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::{load_transactions, SelectionArgs};
use crate::config::{Settings, SpendscopePaths};
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::export::{csv, json, yaml};
use crate::models::PeriodMode;
use crate::services::{AnalyticsEngine, AnalyticsSnapshot};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (the period's transactions only)
    Csv,
    /// JSON format (full snapshot)
    Json,
    /// YAML format (full snapshot, human-readable)
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Transaction file (CSV or JSON)
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (defaults to the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Export a period's snapshot
pub fn handle_export_command(
    paths: &SpendscopePaths,
    settings: &Settings,
    args: ExportArgs,
) -> SpendscopeResult<()> {
    let transactions = load_transactions(&args.file, settings)?;
    let (mode, selection) = args.selection.resolve(settings)?;
    let snapshot = AnalyticsEngine::from_settings(settings).run(&transactions, mode, &selection)?;

    let output = match args.output {
        Some(path) => path,
        None => {
            paths.ensure_directories()?;
            paths.exports_dir().join(default_file_name(&snapshot, args.format))
        }
    };

    let file = File::create(&output).map_err(|e| {
        SpendscopeError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => {
            csv::export_transactions_csv(&snapshot.filtered_transactions, &mut writer)?;
            println!(
                "Exported {} transactions to: {}",
                snapshot.filtered_transactions.len(),
                output.display()
            );
        }
        ExportFormat::Json => {
            json::export_snapshot_json(&snapshot, &mut writer, args.pretty)?;
            println!("Snapshot exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            yaml::export_snapshot_yaml(&snapshot, &mut writer)?;
            println!("Snapshot exported to: {}", output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| SpendscopeError::Export(format!("Failed to write file: {}", e)))?;

    Ok(())
}

/// File name for an export written to the exports directory
fn default_file_name(snapshot: &AnalyticsSnapshot, format: ExportFormat) -> String {
    let scope = match (snapshot.period.key(), snapshot.active_range) {
        (Some(key), _) => key,
        (None, Some(range)) if snapshot.mode == PeriodMode::Custom => {
            format!("{}_{}", range.start(), range.end())
        }
        (None, _) => "all".to_string(),
    };
    format!("spendscope-{}.{}", scope, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use crate::services::Selection;
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        vec![Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            "Market",
            "Groceries",
            Money::from_cents(-4200),
        )]
    }

    #[test]
    fn test_default_file_name_uses_period_key() {
        let snapshot = AnalyticsEngine::default()
            .run(&sample(), PeriodMode::Monthly, &Selection::Key("2024-03".into()))
            .unwrap();
        assert_eq!(
            default_file_name(&snapshot, ExportFormat::Json),
            "spendscope-2024-03.json"
        );
    }

    #[test]
    fn test_default_file_name_for_all_and_custom() {
        let all = AnalyticsEngine::default()
            .run(&sample(), PeriodMode::All, &Selection::Unset)
            .unwrap();
        assert_eq!(default_file_name(&all, ExportFormat::Csv), "spendscope-all.csv");

        let custom = AnalyticsEngine::default()
            .run(
                &sample(),
                PeriodMode::Custom,
                &Selection::Range {
                    start: NaiveDate::from_ymd_opt(2024, 3, 1),
                    end: NaiveDate::from_ymd_opt(2024, 3, 31),
                },
            )
            .unwrap();
        assert_eq!(
            default_file_name(&custom, ExportFormat::Yaml),
            "spendscope-2024-03-01_2024-03-31.yaml"
        );
    }
}
