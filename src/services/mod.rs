//! Service layer for spendscope
//!
//! The service layer holds the period analytics engine and the pieces it is
//! built from, plus the import and pagination helpers the CLI wraps around
//! it. Everything here except the file loaders is pure.

pub mod analytics;
pub mod category;
pub mod filter;
pub mod import;
pub mod pagination;
pub mod period;

pub use analytics::{AnalyticsEngine, AnalyticsSnapshot};
pub use category::{categories_in, load_category_list};
pub use filter::filter_transactions;
pub use import::{ColumnMapping, ImportResult, ImportService, LoadReport};
pub use pagination::{paginate, Page};
pub use period::{format_period_label, PeriodService, Selection};
