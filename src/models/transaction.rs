//! Transaction model
//!
//! Bank-export rows arrive loosely typed: dates as strings in whatever format
//! the bank used, amounts as strings or numbers, an optional `Type` column.
//! [`TransactionRecord`] mirrors that shape; [`Transaction::from_record`] is the
//! single parse-and-validate step that turns it into a strongly typed record.
//! A bad field never rejects the row: an unparseable date leaves `date` empty
//! (the row then matches no period), a non-numeric amount becomes zero with
//! `amount_valid` cleared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Label used for transactions without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Date formats tried, in order, after the caller's preferred format
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y",
];

/// Direction of a transaction as reported by the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in
    Credit,
    /// Money going out
    Debit,
}

impl TransactionType {
    /// Infer the type from the sign of an amount (zero counts as a debit)
    pub fn from_amount(amount: Money) -> Self {
        if amount.is_positive() {
            Self::Credit
        } else {
            Self::Debit
        }
    }

    /// Parse a `Type` column value, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" | "cr" => Some(Self::Credit),
            "debit" | "dr" => Some(Self::Debit),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credit => write!(f, "Credit"),
            Self::Debit => write!(f, "Debit"),
        }
    }
}

/// How income is told apart from expenses
///
/// The two strategies disagree whenever a record's `Type` contradicts its
/// sign, so every aggregation takes exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Positive amounts are income, everything else is an expense
    #[default]
    Sign,
    /// The explicit `Type` column decides; rows without one fall back to the sign
    TypeField,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sign => write!(f, "sign"),
            Self::TypeField => write!(f, "type-field"),
        }
    }
}

/// An amount as it appears in the source: a JSON number or a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

/// A transaction row exactly as the external source provides it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Transaction Date", default)]
    pub date: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Category", default)]
    pub category: Option<String>,

    #[serde(rename = "Amount", default)]
    pub amount: Option<RawAmount>,

    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
}

/// A validated transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Calendar date, `None` when the source date could not be parsed
    pub date: Option<NaiveDate>,

    /// The date text as it appeared in the source
    pub raw_date: String,

    /// Description / payee text
    pub description: String,

    /// Category name, possibly empty
    pub category: String,

    /// Signed amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// False when the source amount was not numeric and was read as zero
    pub amount_valid: bool,

    /// Type column from the source, if it had one
    pub kind: Option<TransactionType>,
}

impl Transaction {
    /// Create a transaction from already-typed values
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date: Some(date),
            raw_date: date.format("%Y-%m-%d").to_string(),
            description: description.into(),
            category: category.into(),
            amount,
            amount_valid: true,
            kind: None,
        }
    }

    /// Set an explicit transaction type
    pub fn with_type(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Validate a source record
    ///
    /// `preferred_format` is tried before the built-in date formats.
    pub fn from_record(record: TransactionRecord, preferred_format: Option<&str>) -> Self {
        let date = parse_transaction_date(&record.date, preferred_format);
        if date.is_none() {
            tracing::debug!(date = %record.date, description = %record.description, "unparseable transaction date");
        }

        let parsed_amount = match &record.amount {
            Some(RawAmount::Number(n)) => Money::from_decimal(*n),
            Some(RawAmount::Text(s)) => Money::parse_lenient(s).ok(),
            None => None,
        };
        let amount_valid = parsed_amount.is_some();
        if !amount_valid {
            tracing::warn!(
                amount = ?record.amount,
                description = %record.description,
                "unreadable amount read as zero"
            );
        }

        Self {
            date,
            raw_date: record.date.trim().to_string(),
            description: record.description.trim().to_string(),
            category: record
                .category
                .map(|c| c.trim().to_string())
                .unwrap_or_default(),
            amount: parsed_amount.unwrap_or_default(),
            amount_valid,
            kind: record.kind.as_deref().and_then(TransactionType::parse),
        }
    }

    /// Category name used for grouping (`Uncategorized` when empty)
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }

    /// The explicit type, or the type inferred from the amount's sign
    pub fn transaction_type(&self) -> TransactionType {
        self.kind
            .unwrap_or_else(|| TransactionType::from_amount(self.amount))
    }

    /// Check if this transaction counts as income under a classification
    pub fn is_income(&self, classification: Classification) -> bool {
        match classification {
            Classification::Sign => self.amount.is_positive(),
            Classification::TypeField => self.transaction_type() == TransactionType::Credit,
        }
    }

    /// Check if the date parsed
    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }
}

/// Parse a source date string into a calendar date
///
/// Only the date portion counts: `2024-01-31T23:59:59-05:00` is January 31st
/// regardless of offset, so late-evening rows never slide into the next day.
pub fn parse_transaction_date(s: &str, preferred_format: Option<&str>) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = parse_date_only(s, preferred_format) {
        return Some(date);
    }

    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    if date_part != s {
        return parse_date_only(date_part, preferred_format);
    }

    None
}

fn parse_date_only(s: &str, preferred_format: Option<&str>) -> Option<NaiveDate> {
    preferred_format
        .into_iter()
        .chain(DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
