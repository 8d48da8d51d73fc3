//! Core data models for spendscope
//!
//! This module contains the data structures the analytics engine works on:
//! money amounts, validated transactions, and calendar periods.

pub mod money;
pub mod period;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use period::{DateRange, Granularity, Period, PeriodMode};
pub use transaction::{
    parse_transaction_date, Classification, RawAmount, Transaction, TransactionRecord,
    TransactionType, UNCATEGORIZED,
};
