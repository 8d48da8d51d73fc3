//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including the paginated register view.

use std::cmp::Ordering;

use super::report::{format_money, truncate};
use crate::models::Transaction;
use crate::services::pagination::Page;

/// Order transactions newest first
///
/// The sort is stable, so same-day transactions keep their input order.
/// Transactions without a date go last.
pub fn sort_newest_first(transactions: &mut [&Transaction]) {
    transactions.sort_by(|a, b| match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency_symbol: &str) -> String {
    let date = txn
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| truncate(&txn.raw_date, 10));

    let flag = if txn.amount_valid { " " } else { "?" };

    format!(
        "{:10} {:30} {:18} {:>14}{}",
        date,
        truncate(&txn.description, 30),
        truncate(txn.category_label(), 18),
        format_money(txn.amount, currency_symbol),
        flag
    )
}

/// Format one page of transactions as a register
pub fn format_transaction_register(page: &Page<'_, &Transaction>, currency_symbol: &str) -> String {
    if page.total_items == 0 {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:30} {:18} {:>14}\n",
        "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for txn in page.items {
        output.push_str(&format_transaction_row(txn, currency_symbol));
        output.push('\n');
    }

    output.push_str(&"-".repeat(76));
    output.push('\n');
    output.push_str(&format!(
        "{}  (page {} of {})\n",
        page.summary(),
        page.current_page,
        page.total_pages
    ));

    let mut hints = Vec::new();
    if page.has_previous() {
        hints.push(format!("previous: --page {}", page.current_page - 1));
    }
    if page.has_next() {
        hints.push(format!("next: --page {}", page.current_page + 1));
    }
    if !hints.is_empty() {
        output.push_str(&hints.join("  "));
        output.push('\n');
    }

    if page.items.iter().any(|t| !t.amount_valid) {
        output.push_str("? amount could not be read and is counted as zero\n");
    }

    output
}
