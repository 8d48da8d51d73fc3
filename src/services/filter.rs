//! Transaction filtering by period
//!
//! Month and week periods match by key equality: a transaction is in the
//! period when its date produces the selected key. Custom and all-time
//! periods match by inclusive calendar-date comparison against the resolved
//! range. Transactions without a parseable date never match. Output keeps
//! input order.

use crate::models::{DateRange, Period, Transaction};

/// Select the transactions that fall in a period
///
/// `range` is the period's resolved range (see
/// [`PeriodService::resolve_range`](super::PeriodService::resolve_range)); it
/// is only consulted for custom and all-time periods. A missing range means
/// there was no data to bound the period, so nothing matches.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    period: &Period,
    range: Option<&DateRange>,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| matches_period(t, period, range))
        .collect()
}

/// Check whether one transaction falls in a period
pub fn matches_period(txn: &Transaction, period: &Period, range: Option<&DateRange>) -> bool {
    let Some(date) = txn.date else {
        return false;
    };

    match period {
        Period::Month { .. } | Period::Week { .. } => match period.granularity() {
            Some(granularity) => Period::for_date(date, granularity) == *period,
            None => false,
        },
        Period::Custom { .. } | Period::All => range.is_some_and(|r| r.contains(date)),
    }
}
