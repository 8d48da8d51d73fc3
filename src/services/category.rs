//! Category service
//!
//! Lists the categories present in transaction data and reads the external
//! category list (the set of names the categorizer assigns from).

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::Transaction;

/// JSON shape of a category list file
#[derive(Debug, Deserialize)]
struct CategoryListFile {
    categories: Vec<String>,
}

/// Distinct non-empty category names in the data, sorted
pub fn categories_in(transactions: &[Transaction]) -> Vec<String> {
    let names: BTreeSet<&str> = transactions
        .iter()
        .map(|t| t.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    names.into_iter().map(String::from).collect()
}

/// Read a category list file
///
/// Accepts JSON (`{"categories": ["Groceries", ...]}`) or plain text with
/// one name per line. Blank lines and `#` comments are ignored; names are
/// trimmed, deduplicated and sorted.
pub fn load_category_list(path: &Path) -> SpendscopeResult<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        SpendscopeError::Io(format!(
            "Failed to read category list {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_category_list(&contents)
}

/// Parse the contents of a category list file
pub fn parse_category_list(contents: &str) -> SpendscopeResult<Vec<String>> {
    let names: Vec<String> = if contents.trim_start().starts_with('{') {
        let file: CategoryListFile = serde_json::from_str(contents)
            .map_err(|e| SpendscopeError::Json(format!("Invalid category list: {}", e)))?;
        file.categories
    } else {
        contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(String::from)
            .collect()
    };

    let unique: BTreeSet<String> = names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    Ok(unique.into_iter().collect())
}
