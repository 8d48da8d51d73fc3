//! Category Trend Report
//!
//! Month-by-month spending for a single category.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::display::report::{format_bar, format_money, separator};
use crate::models::{Granularity, Money, Transaction};
use crate::services::period::period_key;

/// One month of a category trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Month key (`YYYY-MM`)
    pub month: String,
    /// Month name, e.g. "July"
    pub label: String,
    /// Magnitude of the category's signed sum for the month
    pub amount: Money,
}

/// Monthly trend for one category, oldest month first
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTrend {
    pub category: String,
    pub points: Vec<TrendPoint>,
}

impl CategoryTrend {
    /// Build the trend for a category
    ///
    /// Amounts are summed with their sign first and the magnitude taken per
    /// month, so refunds offset purchases within a month. Undated
    /// transactions are skipped.
    pub fn generate(transactions: &[Transaction], category: &str) -> Self {
        let mut monthly: BTreeMap<(i32, u32), Money> = BTreeMap::new();

        for txn in transactions.iter().filter(|t| t.category_label() == category) {
            if let Some(date) = txn.date {
                *monthly.entry((date.year(), date.month())).or_default() += txn.amount;
            }
        }

        let points = monthly
            .into_iter()
            .filter_map(|((year, month), total)| {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                Some(TrendPoint {
                    month: period_key(first, Granularity::Monthly),
                    label: first.format("%B").to_string(),
                    amount: total.abs(),
                })
            })
            .collect();

        Self {
            category: category.to_string(),
            points,
        }
    }

    /// Check if the category had no dated transactions
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Category Trend: {}\n", self.category));
        output.push_str(&separator(60));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No dated transactions in this category.\n");
            return output;
        }

        let max = self
            .points
            .iter()
            .map(|p| p.amount.cents())
            .max()
            .unwrap_or(0) as f64;

        for point in &self.points {
            output.push_str(&format!(
                "{} {:<10} {:>14}  {}\n",
                point.month,
                point.label,
                format_money(point.amount, currency_symbol),
                format_bar(point.amount.cents() as f64, max, 24)
            ));
        }

        output
    }
}
