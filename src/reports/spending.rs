//! Spending Report
//!
//! Per-category breakdown for the transactions in one period. Category totals
//! are signed sums; each category's share is its magnitude over the sum of
//! all category magnitudes, so a category of refunds and one of purchases
//! both count toward the whole.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::display::report::{format_bar, format_money, format_percentage, separator, truncate};
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::{DateRange, Money, Transaction};
use crate::services::AnalyticsSnapshot;

/// Totals for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    /// Category name (`Uncategorized` for missing/empty categories)
    pub category: String,
    /// Number of transactions in the category
    pub count: usize,
    /// Signed sum of the category's amounts
    pub total: Money,
    /// Share of all category magnitudes, 0-100
    pub percent: f64,
}

/// Group transactions by category
///
/// Sorted by percent descending, ties broken by category name. When every
/// category sums to zero all percents are zero.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryStat>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
    for txn in transactions {
        let entry = by_category
            .entry(txn.category_label())
            .or_insert((Money::zero(), 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let grand_magnitude: i64 = by_category.values().map(|(total, _)| total.abs().cents()).sum();

    let mut stats: Vec<CategoryStat> = by_category
        .into_iter()
        .map(|(category, (total, count))| CategoryStat {
            category: category.to_string(),
            count,
            total,
            percent: if grand_magnitude == 0 {
                0.0
            } else {
                (total.abs().cents() as f64 / grand_magnitude as f64) * 100.0
            },
        })
        .collect();

    // Percent is monotonic in magnitude; comparing cents keeps ties exact
    stats.sort_by(|a, b| {
        b.total
            .abs()
            .cmp(&a.total.abs())
            .then_with(|| a.category.cmp(&b.category))
    });

    stats
}

/// Spending Report
#[derive(Debug, Clone, Serialize)]
pub struct SpendingReport {
    /// Human-readable period name
    pub period_label: String,
    /// Resolved bounds, if the period has any
    pub range: Option<DateRange>,
    /// Category breakdown, largest share first
    pub categories: Vec<CategoryStat>,
    /// Total transaction count
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Build the report for an analytics snapshot
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> Self {
        Self::from_stats(
            snapshot.period_label.clone(),
            snapshot.active_range,
            snapshot.category_stats.clone(),
        )
    }

    /// Build a report from precomputed category stats
    pub fn from_stats(
        period_label: impl Into<String>,
        range: Option<DateRange>,
        categories: Vec<CategoryStat>,
    ) -> Self {
        let total_transactions = categories.iter().map(|c| c.count).sum();
        tracing::debug!(
            categories = categories.len(),
            transactions = total_transactions,
            "generated spending report"
        );

        Self {
            period_label: period_label.into(),
            range,
            categories,
            total_transactions,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending by Category: {}\n", self.period_label));
        output.push_str(&separator(80));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No transactions in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>14} {:>6} {:>7}  {}\n",
            "Category", "Amount", "Count", "%", "Share"
        ));
        output.push_str(&separator(80));
        output.push('\n');

        let max_percent = self
            .categories
            .iter()
            .map(|c| c.percent)
            .fold(0.0_f64, f64::max);

        for stat in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>14} {:>6} {:>7}  {}\n",
                truncate(&stat.category, 28),
                format_money(stat.total, currency_symbol),
                stat.count,
                format_percentage(stat.percent),
                format_bar(stat.percent, max_percent, 20)
            ));
        }

        output.push_str(&separator(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>14} {:>6}\n",
            "TOTAL",
            format_money(self.categories.iter().map(|c| c.total).sum(), currency_symbol),
            self.total_transactions
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SpendscopeResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Period", "Category", "Amount", "Transaction Count", "Percentage"])
            .map_err(|e| SpendscopeError::Export(e.to_string()))?;

        for stat in &self.categories {
            csv_writer
                .write_record([
                    self.period_label.clone(),
                    stat.category.clone(),
                    format!("{:.2}", stat.total.as_decimal()),
                    stat.count.to_string(),
                    format!("{:.2}", stat.percent),
                ])
                .map_err(|e| SpendscopeError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| SpendscopeError::Export(e.to_string()))?;

        Ok(())
    }

    /// Get the categories with the largest share
    pub fn top_categories(&self, limit: usize) -> &[CategoryStat] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
