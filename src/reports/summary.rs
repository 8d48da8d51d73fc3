//! Summary Report
//!
//! Income, expense and net totals for the transactions in one period.

use serde::Serialize;

use crate::display::report::{double_separator, format_money};
use crate::models::{Classification, DateRange, Money, Transaction};
use crate::services::AnalyticsSnapshot;

/// Income/expense totals over a set of transactions
///
/// `income` and `expenses` are both magnitudes, so `net = income - expenses`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of income amounts
    pub income: Money,
    /// Sum of expense amounts, as a positive magnitude
    pub expenses: Money,
    /// Income minus expenses
    pub net: Money,
    /// Number of transactions, including those with unreadable amounts
    pub count: usize,
}

impl Totals {
    /// Total a set of transactions under one classification strategy
    pub fn compute<'a, I>(transactions: I, classification: Classification) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();

        for txn in transactions {
            if txn.is_income(classification) {
                totals.income += txn.amount.abs();
            } else {
                totals.expenses += txn.amount.abs();
            }
            totals.count += 1;
        }

        totals.net = totals.income - totals.expenses;
        totals
    }
}

/// Summary Report
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Human-readable period name
    pub period_label: String,
    /// Resolved bounds, if the period has any
    pub range: Option<DateRange>,
    /// Totals for the period
    pub totals: Totals,
    /// Strategy used to tell income from expenses
    pub classification: Classification,
}

impl SummaryReport {
    /// Build the report for an analytics snapshot
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> Self {
        Self {
            period_label: snapshot.period_label.clone(),
            range: snapshot.active_range,
            totals: snapshot.totals,
            classification: snapshot.classification,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary: {}\n", self.period_label));
        if let Some(range) = &self.range {
            output.push_str(&format!("Dates:   {} to {}\n", range.start(), range.end()));
        }
        output.push_str(&double_separator(50));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Income",
            format_money(self.totals.income, currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Expenses",
            format_money(self.totals.expenses, currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Net",
            format_money(self.totals.net, currency_symbol)
        ));
        output.push_str(&format!("{:<20} {:>20}\n", "Transactions", self.totals.count));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PeriodMode, RawAmount, TransactionRecord, TransactionType};
    use crate::services::{AnalyticsEngine, Selection};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn txn(category: &str, cents: i64) -> Transaction {
        Transaction::new(date(), "Test", category, Money::from_cents(cents))
    }

    #[test]
    fn test_totals_example() {
        let transactions = vec![txn("Food", -2000), txn("Food", -3000), txn("Pay", 10000)];
        let totals = Totals::compute(&transactions, Classification::Sign);

        assert_eq!(totals.income.cents(), 10000);
        assert_eq!(totals.expenses.cents(), 5000);
        assert_eq!(totals.net.cents(), 5000);
        assert_eq!(totals.count, 3);
    }

    #[test]
    fn test_totals_empty() {
        let totals = Totals::compute(&Vec::<Transaction>::new(), Classification::Sign);
        assert_eq!(totals, Totals::default());
        assert!(totals.net.is_zero());
    }

    #[test]
    fn test_invalid_amounts_still_counted() {
        let bad = Transaction::from_record(
            TransactionRecord {
                date: "2024-01-15".into(),
                amount: Some(RawAmount::Text("pending".into())),
                ..Default::default()
            },
            None,
        );
        let transactions = vec![bad, txn("Food", -1000)];
        let totals = Totals::compute(&transactions, Classification::Sign);

        assert_eq!(totals.count, 2);
        assert_eq!(totals.expenses.cents(), 1000);
    }

    #[test]
    fn test_classification_changes_totals() {
        // Positive amount labelled as a debit: income by sign, expense by type
        let transactions = vec![
            txn("Refund", 500).with_type(TransactionType::Debit),
            txn("Food", -1000),
        ];

        let by_sign = Totals::compute(&transactions, Classification::Sign);
        assert_eq!(by_sign.income.cents(), 500);
        assert_eq!(by_sign.expenses.cents(), 1000);

        let by_type = Totals::compute(&transactions, Classification::TypeField);
        assert_eq!(by_type.income.cents(), 0);
        assert_eq!(by_type.expenses.cents(), 1500);
        assert_eq!(by_type.net.cents(), -1500);
    }

    #[test]
    fn test_from_snapshot() {
        let transactions = vec![txn("Food", -123456), txn("Pay", 500000)];
        let snapshot = AnalyticsEngine::default()
            .run(&transactions, PeriodMode::Monthly, &Selection::Key("2024-01".into()))
            .unwrap();
        let report = SummaryReport::from_snapshot(&snapshot);

        assert_eq!(report.period_label, "January 2024");
        assert_eq!(report.range, snapshot.active_range);
        assert_eq!(report.totals.count, 2);
        assert_eq!(report.classification, Classification::Sign);
    }

    #[test]
    fn test_format_terminal() {
        let transactions = vec![txn("Food", -123456), txn("Pay", 500000)];
        let snapshot = AnalyticsEngine::default()
            .run(&transactions, PeriodMode::All, &Selection::Unset)
            .unwrap();
        let report = SummaryReport::from_snapshot(&snapshot);

        let output = report.format_terminal("$");
        assert!(output.contains("Summary: All dates"));
        assert!(output.contains("Dates:   2024-01-15 to 2024-01-15"));
        assert!(output.contains("$1,234.56"));
        assert!(output.contains("$5,000.00"));
        assert!(output.contains("$3,765.44"));
    }
}
