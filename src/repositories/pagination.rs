//! Offset pagination for list queries.

/// Which slice of a result to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// The first `limit` results.
    pub fn first(limit: u64) -> Self {
        Self::new(0, limit)
    }
}

/// Where a returned page sits in the full result. Cursors are entity ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub total_count: u64,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Page info for `ids` fetched at `pagination` out of `total_count`.
    pub fn for_page(pagination: Pagination, ids: &[String], total_count: u64) -> Self {
        Self {
            total_count,
            start_cursor: ids.first().cloned(),
            end_cursor: ids.last().cloned(),
            has_next_page: pagination.offset + (ids.len() as u64) < total_count,
            has_previous_page: pagination.offset > 0,
        }
    }
}
