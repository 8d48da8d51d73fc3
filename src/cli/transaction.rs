//! CLI command for the transaction register
//!
//! Lists the transactions of a period one page at a time.

use std::path::PathBuf;

use clap::Args;

use super::{load_transactions, SelectionArgs};
use crate::config::Settings;
use crate::display::{format_transaction_register, sort_newest_first};
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::Transaction;
use crate::services::pagination::PAGE_SIZES;
use crate::services::{paginate, AnalyticsEngine};

/// Arguments for `transactions`
#[derive(Args, Debug)]
pub struct TransactionsArgs {
    /// Transaction file (CSV or JSON)
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Page to show (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page: 10, 20, 50 or 100 (defaults to the configured size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show the most recent transactions first instead of file order
    #[arg(long)]
    pub newest_first: bool,
}

/// Show one page of the period's transactions
pub fn handle_transactions_command(
    settings: &Settings,
    args: TransactionsArgs,
) -> SpendscopeResult<()> {
    let page_size = args.page_size.unwrap_or(settings.page_size);
    if !PAGE_SIZES.contains(&page_size) {
        return Err(SpendscopeError::Validation(format!(
            "Page size must be one of {:?}, got {}",
            PAGE_SIZES, page_size
        )));
    }

    let transactions = load_transactions(&args.file, settings)?;
    let (mode, selection) = args.selection.resolve(settings)?;
    let snapshot = AnalyticsEngine::from_settings(settings).run(&transactions, mode, &selection)?;

    let mut rows: Vec<&Transaction> = snapshot.filtered_transactions.iter().collect();
    if args.newest_first {
        sort_newest_first(&mut rows);
    }

    let page = paginate(&rows, args.page, page_size)?;

    println!("Transactions: {}", snapshot.period_label);
    println!();
    print!(
        "{}",
        format_transaction_register(&page, &settings.currency_symbol)
    );

    Ok(())
}
