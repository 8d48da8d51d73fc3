//! spendscope - Period analytics for bank transaction exports
//!
//! This library reads transaction exports (CSV or JSON), works out which
//! months or ISO weeks the data spans, scopes the data to a selected period
//! or date range, and aggregates it into income/expense totals and a
//! per-category breakdown.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, periods)
//! - `services`: Period enumeration, range resolution, filtering, the
//!   analytics engine, import and pagination
//! - `reports`: Summary, spending breakdown and category trend
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the binary
//! - `logging`: Tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use spendscope::models::PeriodMode;
//! use spendscope::services::{AnalyticsEngine, ImportService, Selection};
//!
//! let loaded = ImportService::new(None).load_file("transactions.csv".as_ref())?;
//! let snapshot = AnalyticsEngine::default().run(
//!     &loaded.transactions,
//!     PeriodMode::Monthly,
//!     &Selection::Key("latest".into()),
//! )?;
//! println!("{} net {}", snapshot.period_label, snapshot.totals.net);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{SpendscopeError, SpendscopeResult};
