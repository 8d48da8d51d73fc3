//! Analytics engine
//!
//! One entry point that takes the raw transactions, a mode and the caller's
//! selection and produces everything a period view shows: the selectable
//! periods, the resolved range, the matching transactions, totals and the
//! category breakdown. Every presentation goes through this, so they all
//! classify income the same way.

use serde::Serialize;

use super::filter::filter_transactions;
use super::period::{format_period_label, PeriodService, Selection};
use crate::config::Settings;
use crate::error::SpendscopeResult;
use crate::models::{Classification, DateRange, Granularity, Period, PeriodMode, Transaction};
use crate::reports::{category_breakdown, CategoryStat, Totals};

/// Everything derived for one view
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    /// Mode the view was requested in
    pub mode: PeriodMode,
    /// Period the selection resolved to
    pub period: Period,
    /// Human-readable period name
    pub period_label: String,
    /// Selectable period keys, most recent first
    pub available_periods: Vec<String>,
    /// Resolved bounds; `None` when there is no data to bound the period
    pub active_range: Option<DateRange>,
    /// Transactions in the period, in input order
    pub filtered_transactions: Vec<Transaction>,
    /// Income/expense totals
    pub totals: Totals,
    /// Per-category breakdown, largest share first
    pub category_stats: Vec<CategoryStat>,
    /// Strategy used to tell income from expenses
    pub classification: Classification,
}

/// Composes period enumeration, range resolution, filtering and aggregation
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    classification: Classification,
    default_granularity: Granularity,
}

impl AnalyticsEngine {
    /// Create an engine with one classification strategy
    ///
    /// `default_granularity` decides which period keys are listed in custom
    /// and all-time views, which have no granularity of their own.
    pub fn new(classification: Classification, default_granularity: Granularity) -> Self {
        Self {
            classification,
            default_granularity,
        }
    }

    /// Create an engine configured from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.classification, settings.default_granularity)
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Compute the snapshot for a mode and selection
    ///
    /// # Errors
    ///
    /// Returns `MalformedPeriodKey` for a key the period enumerator could not
    /// have produced, `InvalidRange` for custom bounds with the start after
    /// the end, and `InvalidSelection` for a selection that does not fit
    /// the mode.
    pub fn run(
        &self,
        transactions: &[Transaction],
        mode: PeriodMode,
        selection: &Selection,
    ) -> SpendscopeResult<AnalyticsSnapshot> {
        let periods = PeriodService::new(transactions);

        let granularity = mode.granularity().unwrap_or(self.default_granularity);
        let available_periods = periods.available_periods(granularity);

        let period = periods.resolve_selection(mode, selection)?;
        let active_range = periods.resolve_range(&period)?;

        let filtered = filter_transactions(transactions, &period, active_range.as_ref());
        let totals = Totals::compute(filtered.iter().copied(), self.classification);
        let category_stats = category_breakdown(filtered.iter().copied());

        tracing::debug!(
            %mode,
            %period,
            matched = filtered.len(),
            total = transactions.len(),
            "computed analytics snapshot"
        );

        Ok(AnalyticsSnapshot {
            mode,
            period_label: format_period_label(&period),
            period,
            available_periods,
            active_range,
            filtered_transactions: filtered.into_iter().cloned().collect(),
            totals,
            category_stats,
            classification: self.classification,
        })
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(Classification::default(), Granularity::default())
    }
}
