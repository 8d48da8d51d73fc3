//! CSV Export functionality
//!
//! Exports the transactions of a view in the normalized source layout, so an
//! export can be read back by the importer.

use std::io::Write;

use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::Transaction;

/// Export transactions to CSV
///
/// Dates that parsed are written as `YYYY-MM-DD`; others keep their source
/// text. The `Type` column is empty unless the source had one.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> SpendscopeResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| SpendscopeError::Export(e.to_string());

    csv_writer
        .write_record(["Transaction Date", "Description", "Category", "Amount", "Type"])
        .map_err(export_err)?;

    for txn in transactions {
        let date = txn
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| txn.raw_date.clone());
        let kind = txn.kind.map(|k| k.to_string()).unwrap_or_default();

        csv_writer
            .write_record([
                date,
                txn.description.clone(),
                txn.category.clone(),
                format!("{:.2}", txn.amount.as_decimal()),
                kind,
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SpendscopeError::Export(e.to_string()))?;

    Ok(())
}
