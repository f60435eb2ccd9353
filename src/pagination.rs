use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Upper bound on the page size a client may request.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Offset/limit window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Clamp client input into a usable window.
    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    /// Number of rows skipped before this page starts. Pages past the end
    /// of any table saturate at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        let skipped = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// One page of results together with the totals a client needs to page.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: usize) -> Self {
        Self {
            items,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages: total.div_ceil(pagination.per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_client_input() {
        let pagination = Pagination::new(Some(0), Some(10_000));

        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, MAX_ITEMS_PER_PAGE);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn pagination_computes_offset() {
        let pagination = Pagination::new(Some(3), Some(15));

        assert_eq!(pagination.offset(), 30);
        assert_eq!(pagination.limit(), 15);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let pagination = Pagination::new(Some(1_000_000_000_000_000_000), Some(MAX_ITEMS_PER_PAGE));

        assert_eq!(pagination.offset(), i64::MAX);

        let pagination = Pagination::new(Some(usize::MAX), None);

        assert_eq!(pagination.offset(), i64::MAX);
    }

    #[test]
    fn page_counts_partial_last_page() {
        let page = Page::new(vec![1, 2], Pagination::new(Some(3), Some(20)), 45);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn page_of_nothing_has_no_pages() {
        let page: Page<u8> = Page::new(Vec::new(), Pagination::new(None, None), 0);

        assert_eq!(page.total_pages, 0);
        assert_eq!(page.per_page, DEFAULT_ITEMS_PER_PAGE);
    }
}
