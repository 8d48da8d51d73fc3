//! JSON Export functionality
//!
//! Exports an analytics snapshot to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{SpendscopeError, SpendscopeResult};
use crate::services::AnalyticsSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot export structure
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Export metadata
    pub metadata: ExportMetadata,

    /// The exported view
    pub snapshot: &'a AnalyticsSnapshot,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// Number of transactions in the view
    pub transaction_count: usize,

    /// Number of categories in the breakdown
    pub category_count: usize,

    /// Earliest transaction date in the view
    pub earliest_transaction: Option<String>,

    /// Latest transaction date in the view
    pub latest_transaction: Option<String>,
}

impl<'a> SnapshotExport<'a> {
    /// Wrap a snapshot for export
    pub fn new(snapshot: &'a AnalyticsSnapshot) -> Self {
        let dates = || snapshot.filtered_transactions.iter().filter_map(|t| t.date);

        let metadata = ExportMetadata {
            transaction_count: snapshot.filtered_transactions.len(),
            category_count: snapshot.category_stats.len(),
            earliest_transaction: dates().min().map(|d| d.to_string()),
            latest_transaction: dates().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            snapshot,
        }
    }
}

/// Export a snapshot to JSON format
pub fn export_snapshot_json<W: Write>(
    snapshot: &AnalyticsSnapshot,
    writer: &mut W,
    pretty: bool,
) -> SpendscopeResult<()> {
    let export = SnapshotExport::new(snapshot);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    written.map_err(|e| SpendscopeError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| SpendscopeError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PeriodMode, Transaction};
    use crate::services::{AnalyticsEngine, Selection};
    use chrono::NaiveDate;

    fn snapshot() -> AnalyticsSnapshot {
        let transactions = vec![
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "Grocer",
                "Food",
                Money::from_cents(-2000),
            ),
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
                "Payroll",
                "Pay",
                Money::from_cents(10000),
            ),
        ];
        AnalyticsEngine::default()
            .run(&transactions, PeriodMode::All, &Selection::Unset)
            .unwrap()
    }

    #[test]
    fn test_json_export() {
        let mut output = Vec::new();
        export_snapshot_json(&snapshot(), &mut output, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["metadata"]["transaction_count"], 2);
        assert_eq!(value["metadata"]["earliest_transaction"], "2024-01-05");
        assert_eq!(value["metadata"]["latest_transaction"], "2024-01-25");
        assert_eq!(value["snapshot"]["totals"]["net"], 8000);
        assert_eq!(
            value["snapshot"]["filtered_transactions"][0]["description"],
            "Grocer"
        );
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let mut output = Vec::new();
        export_snapshot_json(&snapshot(), &mut output, false).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.trim_end().lines().count(), 1);
    }
}
