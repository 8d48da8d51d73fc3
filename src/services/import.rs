//! Transaction import service
//!
//! Reads transaction files into validated transactions. Three shapes are
//! understood: the normalized CSV the cleaning pipeline writes (headers
//! `Transaction Date`, `Description`, `Category`, `Amount`, optional `Type`),
//! a headerless bank debit export (date, description, outflow, inflow,
//! balance), and the JSON the backend serves. Bad rows are counted, never
//! fatal. Payments between the user's own accounts are left out.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::{parse_transaction_date, Money, RawAmount, Transaction, TransactionRecord};

/// Column mapping configuration for CSV import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Index of the date column
    pub date_column: usize,
    /// Index of the description column
    pub description_column: Option<usize>,
    /// Index of the category column
    pub category_column: Option<usize>,
    /// Index of the signed amount column
    pub amount_column: Option<usize>,
    /// Index of the outflow column (if using separate columns)
    pub outflow_column: Option<usize>,
    /// Index of the inflow column (if using separate columns)
    pub inflow_column: Option<usize>,
    /// Index of the Credit/Debit type column
    pub type_column: Option<usize>,
    /// Whether the first row is a header
    pub has_header: bool,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::normalized()
    }
}

impl ColumnMapping {
    /// Create a new column mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout written by the cleaning pipeline
    pub fn normalized() -> Self {
        Self {
            date_column: 0,
            description_column: Some(1),
            category_column: Some(2),
            amount_column: Some(3),
            outflow_column: None,
            inflow_column: None,
            type_column: Some(4),
            has_header: true,
        }
    }

    /// Headerless bank debit export: date, description, outflow, inflow, balance
    pub fn bank_debit() -> Self {
        Self {
            date_column: 0,
            description_column: Some(1),
            category_column: None,
            amount_column: None,
            outflow_column: Some(2),
            inflow_column: Some(3),
            type_column: None,
            has_header: false,
        }
    }

    /// Set whether first row is header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Check if amounts come from separate outflow/inflow columns
    pub fn uses_split_amounts(&self) -> bool {
        self.amount_column.is_none() && self.outflow_column.is_some() && self.inflow_column.is_some()
    }
}

/// Counts of what a load ran into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Transactions produced
    pub rows: usize,
    /// Transactions whose date did not parse
    pub invalid_dates: usize,
    /// Transactions whose amount was read as zero
    pub invalid_amounts: usize,
    /// CSV records that could not be read at all and were skipped
    pub unreadable_rows: usize,
    /// Card and loan payment rows left out so the money is not counted twice
    pub excluded_payments: usize,
}

impl LoadReport {
    fn record(&mut self, txn: &Transaction) {
        self.rows += 1;
        if !txn.has_date() {
            self.invalid_dates += 1;
        }
        if !txn.amount_valid {
            self.invalid_amounts += 1;
        }
    }

    /// Check if every row was read cleanly
    ///
    /// Excluded payments do not count against a clean load.
    pub fn is_clean(&self) -> bool {
        self.invalid_dates == 0 && self.invalid_amounts == 0 && self.unreadable_rows == 0
    }
}

/// Transactions read from a source, with the load report
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub transactions: Vec<Transaction>,
    pub report: LoadReport,
}

/// File format of a transaction source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Pick the format from a file extension (anything but `.json` is CSV)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Backend JSON: a bare array, or the `/transactions` response envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSource {
    Records(Vec<TransactionRecord>),
    Envelope { transactions: Vec<TransactionRecord> },
}

/// Service for reading transaction sources
pub struct ImportService<'a> {
    preferred_date_format: Option<&'a str>,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    ///
    /// `preferred_date_format` is tried before the built-in date formats.
    pub fn new(preferred_date_format: Option<&'a str>) -> Self {
        Self {
            preferred_date_format,
        }
    }

    /// Load a transaction file, choosing the reader by extension
    pub fn load_file(&self, path: &Path) -> SpendscopeResult<ImportResult> {
        let file = File::open(path).map_err(|e| {
            SpendscopeError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);

        let result = match SourceFormat::from_path(path) {
            SourceFormat::Json => self.load_json(reader)?,
            SourceFormat::Csv => self.load_csv(reader)?,
        };

        tracing::info!(
            path = %path.display(),
            rows = result.report.rows,
            invalid_dates = result.report.invalid_dates,
            invalid_amounts = result.report.invalid_amounts,
            unreadable_rows = result.report.unreadable_rows,
            excluded_payments = result.report.excluded_payments,
            "loaded transactions"
        );

        Ok(result)
    }

    /// Read transactions from CSV
    ///
    /// The layout is detected from the first row: a first field that parses
    /// as a date means a headerless export, anything else is a header row.
    pub fn load_csv<R: Read>(&self, reader: R) -> SpendscopeResult<ImportResult> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut mapping: Option<ColumnMapping> = None;
        let mut transactions = Vec::new();
        let mut report = LoadReport::default();

        for (idx, result) in csv_reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(row = idx + 1, error = %e, "skipping unreadable CSV record");
                    report.unreadable_rows += 1;
                    continue;
                }
            };

            if record.iter().all(str::is_empty) {
                continue;
            }

            if mapping.is_none() {
                let detected = self.detect_mapping_from_headers(&record);
                tracing::debug!(?detected, "detected CSV column mapping");
                let header_row = detected.has_header;
                mapping = Some(detected);
                if header_row {
                    continue;
                }
            }

            let Some(active) = mapping.as_ref() else {
                continue;
            };

            let source = self.parse_record(&record, active);
            if is_excluded_payment(&source) {
                tracing::debug!(description = %source.description, "excluding payment row");
                report.excluded_payments += 1;
                continue;
            }

            let txn = Transaction::from_record(source, self.preferred_date_format);
            report.record(&txn);
            transactions.push(txn);
        }

        Ok(ImportResult {
            transactions,
            report,
        })
    }

    /// Read transactions from backend JSON
    pub fn load_json<R: Read>(&self, reader: R) -> SpendscopeResult<ImportResult> {
        let source: JsonSource = serde_json::from_reader(reader)
            .map_err(|e| SpendscopeError::Import(format!("Invalid transaction JSON: {}", e)))?;

        let records = match source {
            JsonSource::Records(records) => records,
            JsonSource::Envelope { transactions } => transactions,
        };

        let mut report = LoadReport::default();
        let mut transactions = Vec::with_capacity(records.len());
        for record in records {
            if is_excluded_payment(&record) {
                report.excluded_payments += 1;
                continue;
            }
            let txn = Transaction::from_record(record, self.preferred_date_format);
            report.record(&txn);
            transactions.push(txn);
        }

        Ok(ImportResult {
            transactions,
            report,
        })
    }

    /// Detect column mapping from the first CSV record
    pub fn detect_mapping_from_headers(&self, headers: &StringRecord) -> ColumnMapping {
        if self.looks_like_data_row(headers) {
            return if headers.len() >= 4 {
                ColumnMapping::bank_debit()
            } else {
                ColumnMapping::normalized().with_header(false)
            };
        }

        let mut mapping = ColumnMapping {
            date_column: 0,
            description_column: None,
            category_column: None,
            amount_column: None,
            outflow_column: None,
            inflow_column: None,
            type_column: None,
            has_header: true,
        };

        let mut date_column: Option<usize> = None;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();

            if h.contains("date") {
                // "Transaction Date" beats posting dates; otherwise the first date column
                if h == "transaction date" || date_column.is_none() {
                    date_column = Some(idx);
                }
            } else if h.contains("amount") && mapping.amount_column.is_none() {
                mapping.amount_column = Some(idx);
            } else if h.contains("category") {
                mapping.category_column = Some(idx);
            } else if h == "type" || h.ends_with(" type") {
                mapping.type_column = Some(idx);
            } else if h.contains("debit") || h.contains("outflow") || h.contains("withdrawal") {
                mapping.outflow_column = Some(idx);
            } else if h.contains("credit") || h.contains("inflow") || h.contains("deposit") {
                mapping.inflow_column = Some(idx);
            } else if h.contains("description") || h.contains("payee") || h.contains("merchant") {
                mapping.description_column = Some(idx);
            }
        }

        mapping.date_column = date_column.unwrap_or(0);
        mapping
    }

    /// Check if a record looks like data (not headers)
    fn looks_like_data_row(&self, record: &StringRecord) -> bool {
        record
            .get(0)
            .and_then(|first| parse_transaction_date(first, self.preferred_date_format))
            .is_some()
    }

    /// Map a CSV record onto the source record shape
    fn parse_record(&self, record: &StringRecord, mapping: &ColumnMapping) -> TransactionRecord {
        let field = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let amount = if mapping.uses_split_amounts() {
            split_amount(
                mapping.outflow_column.and_then(|c| record.get(c)),
                mapping.inflow_column.and_then(|c| record.get(c)),
            )
        } else {
            field(mapping.amount_column).map(RawAmount::Text)
        };

        TransactionRecord {
            date: record.get(mapping.date_column).unwrap_or_default().to_string(),
            description: field(mapping.description_column).unwrap_or_default(),
            category: field(mapping.category_column),
            amount,
            kind: field(mapping.type_column),
        }
    }
}

/// `Type` values that mark a payment between the user's own accounts
const PAYMENT_TYPES: [&str; 2] = ["payment", "loan_pmt"];

/// Description prefix of credit card payments in bank debit exports
const CARD_PAYMENT_PREFIX: &str = "TD VISA";

/// Check if a row moves money between the user's own accounts
///
/// A card payment shows up once as a debit in the bank export and again as
/// a payment in the card export; the card's purchases already carry the
/// spending. Loan payments are dropped for the same reason.
fn is_excluded_payment(record: &TransactionRecord) -> bool {
    let payment_type = record.kind.as_deref().is_some_and(|kind| {
        PAYMENT_TYPES
            .iter()
            .any(|t| kind.trim().eq_ignore_ascii_case(t))
    });

    payment_type
        || record
            .description
            .trim_start()
            .to_ascii_uppercase()
            .starts_with(CARD_PAYMENT_PREFIX)
}

/// Combine outflow/inflow columns into one signed amount (inflow - outflow)
///
/// An empty side counts as zero. Returns `None` when a non-empty side is not
/// a number.
fn split_amount(outflow: Option<&str>, inflow: Option<&str>) -> Option<RawAmount> {
    let side = |s: Option<&str>| match s.map(str::trim) {
        None | Some("") => Some(Money::zero()),
        Some(value) => Money::parse_lenient(value).ok().map(|m| m.abs()),
    };

    let outflow = side(outflow)?;
    let inflow = side(inflow)?;
    Some(RawAmount::Number((inflow - outflow).as_decimal()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_normalized_csv() {
        let csv_data = "Transaction Date,Description,Category,Amount,Type\n\
                        07/15/2024,Grocer,Groceries,-42.10,Debit\n\
                        07/16/2024,Payroll,Income,\"1,500.00\",Credit\n";
        let result = ImportService::new(Some("%m/%d/%Y"))
            .load_csv(csv_data.as_bytes())
            .unwrap();

        assert_eq!(result.report.rows, 2);
        assert!(result.report.is_clean());

        let first = &result.transactions[0];
        assert_eq!(first.date, Some(date(2024, 7, 15)));
        assert_eq!(first.description, "Grocer");
        assert_eq!(first.category, "Groceries");
        assert_eq!(first.amount.cents(), -4210);
        assert_eq!(first.kind, Some(TransactionType::Debit));

        assert_eq!(result.transactions[1].amount.cents(), 150000);
    }

    #[test]
    fn test_load_csv_with_reordered_headers() {
        let csv_data = "amount,category,transaction date,description\n-5.00,,2024-01-02,Coffee\n";
        let result = ImportService::new(None).load_csv(csv_data.as_bytes()).unwrap();

        let txn = &result.transactions[0];
        assert_eq!(txn.date, Some(date(2024, 1, 2)));
        assert_eq!(txn.amount.cents(), -500);
        assert_eq!(txn.description, "Coffee");
        assert!(txn.category.is_empty());
        assert!(txn.kind.is_none());
    }

    #[test]
    fn test_load_headerless_bank_debit_csv() {
        let csv_data = "2024-03-01,COFFEE SHOP,4.50,,995.50\n\
                        2024-03-02,PAYROLL,,1200.00,2195.50\n";
        let result = ImportService::new(None).load_csv(csv_data.as_bytes()).unwrap();

        assert_eq!(result.report.rows, 2);
        assert_eq!(result.transactions[0].amount.cents(), -450);
        assert_eq!(result.transactions[0].description, "COFFEE SHOP");
        assert_eq!(result.transactions[1].amount.cents(), 120000);
        assert_eq!(result.transactions[1].date, Some(date(2024, 3, 2)));
    }

    #[test]
    fn test_bad_fields_are_counted_not_fatal() {
        let csv_data = "Transaction Date,Description,Category,Amount\n\
                        not-a-date,Mystery,Misc,-1.00\n\
                        2024-01-05,Typo,Misc,abc\n\
                        2024-01-06,Fine,Misc,(3.00)\n";
        let result = ImportService::new(None).load_csv(csv_data.as_bytes()).unwrap();

        assert_eq!(result.report.rows, 3);
        assert_eq!(result.report.invalid_dates, 1);
        assert_eq!(result.report.invalid_amounts, 1);
        assert!(!result.report.is_clean());
        assert_eq!(result.transactions[2].amount.cents(), -300);
    }

    #[test]
    fn test_load_json_array_and_envelope() {
        let service = ImportService::new(None);

        let array = r#"[{"Transaction Date":"2024-02-01","Description":"A","Category":"Food","Amount":-12.5},
                        {"Transaction Date":"2024-02-02","Description":"B","Category":null,"Amount":"20.00","Type":"Credit"}]"#;
        let result = service.load_json(array.as_bytes()).unwrap();
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[0].amount.cents(), -1250);
        assert_eq!(result.transactions[1].kind, Some(TransactionType::Credit));

        let envelope = r#"{"transactions":[{"Transaction Date":"2024-02-01","Description":"A","Amount":"1"}]}"#;
        let result = service.load_json(envelope.as_bytes()).unwrap();
        assert_eq!(result.report.rows, 1);
    }

    #[test]
    fn test_invalid_json_is_an_import_error() {
        let err = ImportService::new(None)
            .load_json("{\"rows\": 3}".as_bytes())
            .unwrap_err();
        assert!(matches!(err, SpendscopeError::Import(_)));
    }

    #[test]
    fn test_load_file_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("transactions.json");
        std::fs::write(
            &json_path,
            r#"[{"Transaction Date":"2024-02-01","Description":"A","Amount":"-1.00"}]"#,
        )
        .unwrap();

        let result = ImportService::new(None).load_file(&json_path).unwrap();
        assert_eq!(result.transactions.len(), 1);

        let missing = temp_dir.path().join("missing.csv");
        assert!(ImportService::new(None).load_file(&missing).is_err());
    }

    #[test]
    fn test_detect_mapping() {
        let service = ImportService::new(None);

        let headers = StringRecord::from(vec!["Posted Date", "Payee", "Withdrawal", "Deposit"]);
        let mapping = service.detect_mapping_from_headers(&headers);
        assert!(mapping.uses_split_amounts());
        assert_eq!(mapping.description_column, Some(1));

        let data = StringRecord::from(vec!["2024-01-01", "Shop", "5.00", "", "100.00"]);
        assert_eq!(
            service.detect_mapping_from_headers(&data),
            ColumnMapping::bank_debit()
        );
    }

    #[test]
    fn test_transaction_date_preferred_over_post_date() {
        let service = ImportService::new(None);

        let headers = StringRecord::from(vec![
            "Transaction Date",
            "Post Date",
            "Description",
            "Category",
            "Type",
            "Amount",
            "Memo",
        ]);
        let mapping = service.detect_mapping_from_headers(&headers);
        assert_eq!(mapping.date_column, 0);
        assert_eq!(mapping.type_column, Some(4));
        assert_eq!(mapping.amount_column, Some(5));

        let csv_data = "Transaction Date,Post Date,Description,Category,Type,Amount,Memo
                        01/31/2024,02/02/2024,Grocer,Food,Sale,-42.10,
";
        let result = service.load_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(result.transactions[0].date, Some(date(2024, 1, 31)));
        assert_eq!(result.transactions[0].amount.cents(), -4210);

        // Without a "Transaction Date" column the first date column is used
        let headers = StringRecord::from(vec!["Posting Date", "Value Date", "Amount"]);
        assert_eq!(service.detect_mapping_from_headers(&headers).date_column, 0);

        let headers = StringRecord::from(vec!["Post Date", "Description", "Transaction Date", "Amount"]);
        assert_eq!(service.detect_mapping_from_headers(&headers).date_column, 2);
    }

    #[test]
    fn test_out_of_range_amount_is_flagged() {
        let csv_data = "Transaction Date,Description,Category,Amount
                        2024-01-05,Big,Misc,999999999999999999
                        2024-01-05,Garbled,Misc,12abc34
                        2024-01-06,Small,Misc,-5.00
";
        let result = ImportService::new(None).load_csv(csv_data.as_bytes()).unwrap();

        assert_eq!(result.report.rows, 3);
        assert_eq!(result.report.invalid_amounts, 2);
        assert!(!result.transactions[0].amount_valid);
        assert!(result.transactions[0].amount.is_zero());
        assert!(!result.transactions[1].amount_valid);
        assert_eq!(result.transactions[2].amount.cents(), -500);

        let json = r#"[{"Transaction Date":"2024-01-05","Description":"Big","Amount":1e300}]"#;
        let result = ImportService::new(None).load_json(json.as_bytes()).unwrap();
        assert_eq!(result.report.invalid_amounts, 1);
    }

    #[test]
    fn test_payments_between_accounts_are_excluded() {
        let service = ImportService::new(None);

        let card = "Transaction Date,Description,Category,Amount,Type
                    01/05/2024,Grocer,Food,-20.00,Sale
                    01/10/2024,Payment Thank You,,500.00,Payment
";
        let result = service.load_csv(card.as_bytes()).unwrap();
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].description, "Grocer");
        assert_eq!(result.report.excluded_payments, 1);
        assert_eq!(result.report.rows, 1);
        assert!(result.report.is_clean());

        let bank = "2024-03-01,COFFEE SHOP,4.50,,995.50
                    2024-03-02,TD VISA PREAUTH PYMT,500.00,,495.50
";
        let result = service.load_csv(bank.as_bytes()).unwrap();
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.report.excluded_payments, 1);

        let json = r#"[{"Transaction Date":"2024-02-01","Description":"Car loan","Amount":-300,"Type":"LOAN_PMT"},
                       {"Transaction Date":"2024-02-02","Description":"Rent","Amount":-800,"Type":"Debit"}]"#;
        let result = service.load_json(json.as_bytes()).unwrap();
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].description, "Rent");
        assert_eq!(result.report.excluded_payments, 1);
    }
}
