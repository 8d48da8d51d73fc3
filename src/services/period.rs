//! Period service
//!
//! Enumerates the periods present in a transaction list, turns a caller's
//! selection into a [`Period`], and resolves periods to concrete date ranges.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::{DateRange, Granularity, Period, PeriodMode, Transaction};

/// Key that selects the most recent available period
pub const LATEST_KEY: &str = "latest";

/// What the caller picked alongside a [`PeriodMode`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing picked
    #[default]
    Unset,
    /// A period key produced by [`PeriodService::available_periods`], or `latest`
    Key(String),
    /// Explicit bounds for a custom range
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

/// The period key of a date
pub fn period_key(date: NaiveDate, granularity: Granularity) -> String {
    // Month and week periods always have a key
    Period::for_date(date, granularity).key().unwrap_or_default()
}

/// Service for period enumeration and range resolution over one transaction list
pub struct PeriodService<'a> {
    transactions: &'a [Transaction],
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Distinct period keys present in the data, most recent first
    ///
    /// Transactions without a parseable date are skipped. An empty list
    /// yields no periods.
    pub fn available_periods(&self, granularity: Granularity) -> Vec<String> {
        let keys: BTreeSet<String> = self
            .transactions
            .iter()
            .filter_map(|t| t.date)
            .map(|d| period_key(d, granularity))
            .collect();

        keys.into_iter().rev().collect()
    }

    /// Earliest and latest transaction dates, if any transaction is dated
    pub fn extent(&self) -> Option<DateRange> {
        let mut dates = self.transactions.iter().filter_map(|t| t.date);
        let first = dates.next()?;
        Some(dates.fold(DateRange::day(first), DateRange::extend_to))
    }

    /// Resolve a period to inclusive date bounds
    ///
    /// Month and week periods have fixed calendar bounds. `All` spans the
    /// data. A custom period keeps the bounds it was given and fills a
    /// missing one from the data. Returns `Ok(None)` when the bounds depend
    /// on the data and there is none.
    pub fn resolve_range(&self, period: &Period) -> SpendscopeResult<Option<DateRange>> {
        match period {
            Period::Month { .. } | Period::Week { .. } => Ok(period.calendar_range()),
            Period::All => Ok(self.extent()),
            Period::Custom { start, end } => {
                let extent = self.extent();
                let start = start.or_else(|| extent.map(|r| r.start()));
                let end = end.or_else(|| extent.map(|r| r.end()));
                match (start, end) {
                    (Some(start), Some(end)) => DateRange::new(start, end).map(Some),
                    _ => Ok(None),
                }
            }
        }
    }

    /// Turn a mode and selection into a period
    ///
    /// Month and week modes take a key; without one nothing is selected and
    /// the whole data set is in scope. `latest` picks the newest available
    /// key. Custom mode takes bounds. All mode ignores the selection.
    pub fn resolve_selection(
        &self,
        mode: PeriodMode,
        selection: &Selection,
    ) -> SpendscopeResult<Period> {
        match (mode.granularity(), selection) {
            (_, _) if mode == PeriodMode::All => Ok(Period::All),
            (Some(_), Selection::Unset) => Ok(Period::All),
            (Some(granularity), Selection::Key(key)) if key.eq_ignore_ascii_case(LATEST_KEY) => {
                match self.available_periods(granularity).first() {
                    Some(latest) => Period::parse_key(latest, granularity),
                    None => Ok(Period::All),
                }
            }
            (Some(granularity), Selection::Key(key)) => Period::parse_key(key, granularity),
            (Some(_), Selection::Range { .. }) => Err(SpendscopeError::InvalidSelection(format!(
                "{} mode selects by period key, not by date range",
                mode
            ))),
            (None, Selection::Range { start, end }) => {
                if let (Some(start), Some(end)) = (start, end) {
                    DateRange::new(*start, *end)?;
                }
                Ok(Period::custom(*start, *end))
            }
            (None, Selection::Unset) => Ok(Period::custom(None, None)),
            (None, Selection::Key(key)) => Err(SpendscopeError::InvalidSelection(format!(
                "custom mode takes a date range, got period key '{}'",
                key
            ))),
        }
    }
}

/// Format a period in a human-friendly way
///
/// Months read as `July 2024`; weeks by their Monday, as `Jul 1, 2024`.
pub fn format_period_label(period: &Period) -> String {
    match period {
        Period::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| period.to_string()),
        Period::Week { .. } => period
            .calendar_range()
            .map(|r| r.start().format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| period.to_string()),
        Period::Custom { start, end } => match (start, end) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("From {}", start),
            (None, Some(end)) => format!("Through {}", end),
            (None, None) => "All dates".to_string(),
        },
        Period::All => "All dates".to_string(),
    }
}

/// Format a period key in a human-friendly way, falling back to the raw key
pub fn format_key_label(key: &str, granularity: Granularity) -> String {
    Period::parse_key(key, granularity)
        .map(|p| format_period_label(&p))
        .unwrap_or_else(|_| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(y: i32, m: u32, d: u32) -> Transaction {
        Transaction::new(date(y, m, d), "Test", "Food", Money::from_cents(-1000))
    }

    fn undated() -> Transaction {
        Transaction::from_record(
            TransactionRecord {
                date: "garbage".into(),
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn test_available_periods_monthly_most_recent_first() {
        let transactions = vec![
            txn(2024, 1, 15),
            txn(2024, 3, 1),
            undated(),
            txn(2023, 12, 31),
            txn(2024, 1, 2),
        ];
        let service = PeriodService::new(&transactions);

        assert_eq!(
            service.available_periods(Granularity::Monthly),
            vec!["2024-03", "2024-01", "2023-12"]
        );
    }

    #[test]
    fn test_available_periods_weekly() {
        let transactions = vec![txn(2024, 1, 1), txn(2024, 1, 7), txn(2024, 1, 8)];
        let service = PeriodService::new(&transactions);

        assert_eq!(
            service.available_periods(Granularity::Weekly),
            vec!["2024-02", "2024-01"]
        );
    }

    #[test]
    fn test_available_periods_empty() {
        let service = PeriodService::new(&[]);
        assert!(service.available_periods(Granularity::Monthly).is_empty());
        assert!(service.extent().is_none());
    }

    #[test]
    fn test_resolve_range_is_idempotent() {
        let transactions = vec![txn(2024, 2, 10)];
        let service = PeriodService::new(&transactions);
        let period = Period::parse_key("2024-02", Granularity::Monthly).unwrap();

        let first = service.resolve_range(&period).unwrap();
        let second = service.resolve_range(&period).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().end(), date(2024, 2, 29));
    }

    #[test]
    fn test_resolve_range_all_spans_data() {
        let transactions = vec![txn(2024, 3, 1), undated(), txn(2023, 11, 20)];
        let service = PeriodService::new(&transactions);

        let range = service.resolve_range(&Period::All).unwrap().unwrap();
        assert_eq!(range.start(), date(2023, 11, 20));
        assert_eq!(range.end(), date(2024, 3, 1));
    }

    #[test]
    fn test_resolve_range_custom_fills_missing_bounds() {
        let transactions = vec![txn(2024, 1, 5), txn(2024, 4, 5)];
        let service = PeriodService::new(&transactions);

        let range = service
            .resolve_range(&Period::custom(Some(date(2024, 2, 1)), None))
            .unwrap()
            .unwrap();
        assert_eq!(range.start(), date(2024, 2, 1));
        assert_eq!(range.end(), date(2024, 4, 5));

        let range = service
            .resolve_range(&Period::custom(None, None))
            .unwrap()
            .unwrap();
        assert_eq!(range.start(), date(2024, 1, 5));
    }

    #[test]
    fn test_resolve_range_empty_data() {
        let service = PeriodService::new(&[]);
        assert_eq!(service.resolve_range(&Period::All).unwrap(), None);
        assert_eq!(
            service.resolve_range(&Period::custom(None, None)).unwrap(),
            None
        );
        // Explicit bounds need no data
        let range = service
            .resolve_range(&Period::custom(Some(date(2024, 1, 1)), Some(date(2024, 1, 31))))
            .unwrap();
        assert!(range.is_some());
    }

    #[test]
    fn test_resolve_selection() {
        let transactions = vec![txn(2024, 1, 5), txn(2024, 4, 5)];
        let service = PeriodService::new(&transactions);

        assert_eq!(
            service
                .resolve_selection(PeriodMode::Monthly, &Selection::Key("2024-01".into()))
                .unwrap(),
            Period::monthly(2024, 1)
        );
        assert_eq!(
            service
                .resolve_selection(PeriodMode::Monthly, &Selection::Key("latest".into()))
                .unwrap(),
            Period::monthly(2024, 4)
        );
        assert_eq!(
            service
                .resolve_selection(PeriodMode::Weekly, &Selection::Unset)
                .unwrap(),
            Period::All
        );
        assert_eq!(
            service
                .resolve_selection(PeriodMode::All, &Selection::Key("anything".into()))
                .unwrap(),
            Period::All
        );
    }

    #[test]
    fn test_resolve_selection_errors() {
        let service = PeriodService::new(&[]);

        let err = service
            .resolve_selection(PeriodMode::Monthly, &Selection::Key("July".into()))
            .unwrap_err();
        assert!(err.is_malformed_key());

        let err = service
            .resolve_selection(
                PeriodMode::Custom,
                &Selection::Range {
                    start: Some(date(2024, 2, 1)),
                    end: Some(date(2024, 1, 1)),
                },
            )
            .unwrap_err();
        assert!(matches!(err, SpendscopeError::InvalidRange { .. }));

        let err = service
            .resolve_selection(PeriodMode::Custom, &Selection::Key("2024-01".into()))
            .unwrap_err();
        assert!(matches!(err, SpendscopeError::InvalidSelection(_)));
    }

    #[test]
    fn test_latest_on_empty_data_selects_nothing() {
        let service = PeriodService::new(&[]);
        assert_eq!(
            service
                .resolve_selection(PeriodMode::Monthly, &Selection::Key("latest".into()))
                .unwrap(),
            Period::All
        );
    }

    #[test]
    fn test_format_period_label() {
        assert_eq!(format_period_label(&Period::monthly(2024, 7)), "July 2024");
        assert_eq!(format_period_label(&Period::weekly(2024, 27)), "Jul 1, 2024");
        assert_eq!(format_period_label(&Period::All), "All dates");
        assert_eq!(format_key_label("2024-02", Granularity::Monthly), "February 2024");
        assert_eq!(format_key_label("bogus", Granularity::Weekly), "bogus");
    }
}
