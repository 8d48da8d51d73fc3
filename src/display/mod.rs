//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions and report figures for
//! terminal display.

pub mod report;
pub mod transaction;

pub use report::{format_bar, format_money, format_percentage};
pub use transaction::{format_transaction_register, format_transaction_row, sort_newest_first};
