//! Pagination of filtered transaction lists

use crate::error::{SpendscopeError, SpendscopeResult};

/// Page sizes offered to the user
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// 1-based page number, clamped to the available pages
    pub current_page: usize,
    /// Number of pages (at least 1, even for an empty list)
    pub total_pages: usize,
    /// Index of the first item on the page in the full list
    pub start_index: usize,
    /// One past the index of the last item on the page
    pub end_index: usize,
    /// Length of the full list
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    /// Check if there is a page after this one
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Check if there is a page before this one
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Position line, e.g. "Showing 1 to 20 of 57 transactions"
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No transactions to show".to_string();
        }
        format!(
            "Showing {} to {} of {} transactions",
            self.start_index + 1,
            self.end_index,
            self.total_items
        )
    }
}

/// Cut one page out of a list
///
/// Pages are 1-based; a page number past either end is clamped to the
/// nearest page instead of producing an empty page.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> SpendscopeResult<Page<'_, T>> {
    if page_size == 0 {
        return Err(SpendscopeError::Validation(
            "Page size must be at least 1".into(),
        ));
    }

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = page.clamp(1, total_pages);

    let start_index = (current_page - 1) * page_size;
    let end_index = (start_index + page_size).min(total_items);

    Ok(Page {
        items: &items[start_index..end_index],
        current_page,
        total_pages,
        start_index,
        end_index,
        total_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_and_last_page() {
        let items: Vec<u32> = (0..57).collect();

        let page = paginate(&items, 1, 20).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.summary(), "Showing 1 to 20 of 57 transactions");
        assert!(page.has_next());
        assert!(!page.has_previous());

        let page = paginate(&items, 3, 20).unwrap();
        assert_eq!(page.items, &items[40..57]);
        assert_eq!(page.summary(), "Showing 41 to 57 of 57 transactions");
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_clamps_page_number() {
        let items: Vec<u32> = (0..25).collect();

        assert_eq!(paginate(&items, 0, 10).unwrap().current_page, 1);
        let page = paginate(&items, 99, 10).unwrap();
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 20).unwrap();

        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.summary(), "No transactions to show");
    }

    #[test]
    fn test_paginate_rejects_zero_page_size() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 1, 0).unwrap_err().is_validation());
    }
}
