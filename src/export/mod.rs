//! Export module for spendscope
//!
//! Writes an analytics snapshot in multiple formats:
//! - CSV: the view's transactions (spreadsheet-compatible, re-importable)
//! - JSON: the full snapshot, machine-readable
//! - YAML: the full snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use json::{export_snapshot_json, SnapshotExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_snapshot_yaml;
