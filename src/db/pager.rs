//! Pagination arithmetic shared by the object list (paged in memory) and
//! table data (paged in SQL).

/// Number of pages needed for `count` items at `page_size` per page.
/// Zero items means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (count + page_size - 1) / page_size
}

/// The slice of `items` belonging to `page` (1-based; values below 1 behave
/// as 1). An out-of-range page yields an empty slice, never an error.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// SQL-side window over table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWindow {
    /// Rows skipped before the window starts.
    pub offset: u64,
    /// Rows the window fetches.
    pub fetch_count: u64,
    /// Pages available at this page size.
    pub total_pages: u64,
}

impl TableWindow {
    /// Window for `page` (1-based; values below 1 behave as 1) over
    /// `row_count` rows at `page_size` rows per page.
    pub fn new(row_count: u64, page: u64, page_size: u64) -> Self {
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let total_pages = if page_size == 0 {
            0
        } else {
            (row_count + page_size - 1) / page_size
        };
        Self {
            offset,
            fetch_count: page_size,
            total_pages,
        }
    }

    /// Upper ROWNUM bound for the nested window query.
    pub fn upper_bound(&self) -> u64 {
        self.offset.saturating_add(self.fetch_count)
    }
}
