//! CLI command for categories
//!
//! Lists the categories used in a transaction file and, given the category
//! list the categorizer assigns from, where the two disagree.

use std::path::PathBuf;

use clap::Args;

use super::load_transactions;
use crate::config::Settings;
use crate::error::SpendscopeResult;
use crate::services::{categories_in, load_category_list};

/// Arguments for `categories`
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Transaction file (CSV or JSON)
    pub file: PathBuf,

    /// Category list to compare against (JSON or one name per line)
    #[arg(short, long)]
    pub list: Option<PathBuf>,
}

/// List categories
pub fn handle_categories_command(settings: &Settings, args: CategoriesArgs) -> SpendscopeResult<()> {
    let transactions = load_transactions(&args.file, settings)?;
    let used = categories_in(&transactions);

    if used.is_empty() {
        println!("No categorized transactions found.");
    } else {
        println!("Categories ({}):", used.len());
        for name in &used {
            println!("  {}", name);
        }
    }

    let Some(list_path) = args.list else {
        return Ok(());
    };

    let known = load_category_list(&list_path)?;

    let unknown: Vec<&String> = used.iter().filter(|c| !known.contains(c)).collect();
    let unused: Vec<&String> = known.iter().filter(|c| !used.contains(c)).collect();

    if unknown.is_empty() {
        println!();
        println!("Every category is on the list.");
    } else {
        println!();
        println!("Not in category list ({}):", unknown.len());
        for name in unknown {
            println!("  {}", name);
        }
    }

    if !unused.is_empty() {
        println!();
        println!("Unused from category list ({}):", unused.len());
        for name in unused {
            println!("  {}", name);
        }
    }

    Ok(())
}
