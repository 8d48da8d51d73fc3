//! YAML Export functionality
//!
//! Exports an analytics snapshot to YAML for human reading.

use std::io::Write;

use crate::error::{SpendscopeError, SpendscopeResult};
use crate::export::json::SnapshotExport;
use crate::services::AnalyticsSnapshot;

/// Export a snapshot to YAML format
pub fn export_snapshot_yaml<W: Write>(
    snapshot: &AnalyticsSnapshot,
    writer: &mut W,
) -> SpendscopeResult<()> {
    let export = SnapshotExport::new(snapshot);
    let io_err = |e: std::io::Error| SpendscopeError::Export(e.to_string());

    writeln!(writer, "# spendscope snapshot export").map_err(io_err)?;
    writeln!(writer, "# Period: {}", snapshot.period_label).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SpendscopeError::Export(e.to_string()))?;

    Ok(())
}
