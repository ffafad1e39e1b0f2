//! Paging types for transaction listings and history search

use serde::Serialize;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A requested page (0-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: usize,
    pub size: usize,
}

impl PageRequest {
    /// A page size of zero is treated as a size of one
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number,
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.number.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the size of the full result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Cut the requested page out of an already ordered result set
    pub fn from_ordered(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Self {
            items,
            number: request.number,
            size: request.size,
            total_items,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.size.max(1))
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first_page(0, 2, vec![1, 2])]
    #[case::last_partial_page(2, 2, vec![5])]
    #[case::past_the_end(5, 2, vec![])]
    fn test_from_ordered(#[case] number: usize, #[case] size: usize, #[case] expected: Vec<i32>) {
        let page = Page::from_ordered(vec![1, 2, 3, 4, 5], PageRequest::new(number, size));
        assert_eq!(page.items, expected);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.size, 1);
    }

    #[test]
    fn test_map_keeps_paging() {
        let page = Page::from_ordered(vec![1, 2, 3], PageRequest::new(1, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_items, 3);
    }
}
