//! Reports module for spendscope
//!
//! Provides the period views built on the analytics engine: a totals
//! summary, a per-category spending breakdown, and a monthly trend for a
//! single category.

pub mod spending;
pub mod summary;
pub mod trend;

pub use spending::{category_breakdown, CategoryStat, SpendingReport};
pub use summary::{SummaryReport, Totals};
pub use trend::{CategoryTrend, TrendPoint};
