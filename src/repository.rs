//! Repository seam between the browsing core and a backing store.
//!
//! This trait abstracts list/create/update/delete over one record type,
//! enabling dependency injection and swapping the real backend for an
//! in-memory store in tests. Implementations live in [`crate::adapters`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RepoError;
use crate::query::QueryDescriptor;

/// One page of results plus total-count metadata.
///
/// Stored verbatim as returned by the repository; `total_pages` is always
/// `ceil(total / limit)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow<T> {
    /// Rows for this page, in backend order.
    pub data: Vec<T>,
    /// 1-based page index this window covers.
    pub page: usize,
    /// Requested rows per page.
    pub limit: usize,
    /// Total matching rows across all pages.
    pub total: usize,
    /// Total page count at this limit.
    pub total_pages: usize,
}

impl<T> PageWindow<T> {
    /// Build a window, deriving `total_pages` from `total` and `limit`.
    pub fn new(data: Vec<T>, page: usize, limit: usize, total: usize) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            data,
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// An empty window at the given position.
    pub fn empty(page: usize, limit: usize) -> Self {
        Self::new(Vec::new(), page, limit, 0)
    }

    /// Whether this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check the structural invariants of the window.
    ///
    /// Used by the in-memory store and by tests to catch windows a broken
    /// backend could hand us.
    pub fn is_consistent(&self) -> bool {
        let expected_pages = if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        };
        self.total_pages == expected_pages
            && self.data.len() <= self.limit
            && self.page <= self.total_pages.max(1)
    }
}

/// Backing-store operations for one record type.
///
/// The browsing core stays agnostic to what sits behind this trait: the
/// HTTP client adapter talks to the real backend, the in-memory adapter
/// backs tests and local development. All failures surface as
/// [`RepoError`] values rather than panics.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Record type returned by list and mutation calls.
    type Record: Clone + Send + Sync;
    /// Input for create calls.
    type Create: Send + Sync;
    /// Input for update calls.
    type Update: Send + Sync;

    /// Fetch the page of records selected by `query`.
    async fn list(&self, query: &QueryDescriptor) -> Result<PageWindow<Self::Record>, RepoError>;

    /// Create a record, returning it with its store-assigned id.
    async fn create(&self, data: &Self::Create) -> Result<Self::Record, RepoError>;

    /// Update the record with the given id, returning the stored result.
    async fn update(&self, id: &str, data: &Self::Update) -> Result<Self::Record, RepoError>;

    /// Delete the record with the given id.
    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let window: PageWindow<u32> = PageWindow::new(vec![], 1, 10, 25);
        assert_eq!(window.total_pages, 3);

        let window: PageWindow<u32> = PageWindow::new(vec![], 1, 10, 30);
        assert_eq!(window.total_pages, 3);

        let window: PageWindow<u32> = PageWindow::new(vec![], 1, 10, 31);
        assert_eq!(window.total_pages, 4);
    }

    #[test]
    fn test_empty_window() {
        let window: PageWindow<u32> = PageWindow::empty(1, 10);
        assert!(window.is_empty());
        assert_eq!(window.total, 0);
        assert_eq!(window.total_pages, 0);
        assert!(window.is_consistent());
    }

    #[test]
    fn test_consistency_checks() {
        let good = PageWindow::new(vec![1, 2, 3], 1, 10, 3);
        assert!(good.is_consistent());

        let mut bad_pages = good.clone();
        bad_pages.total_pages = 9;
        assert!(!bad_pages.is_consistent());

        let overfull = PageWindow {
            data: vec![1, 2, 3],
            page: 1,
            limit: 2,
            total: 3,
            total_pages: 2,
        };
        assert!(!overfull.is_consistent());

        let past_end = PageWindow::<u32> {
            data: vec![],
            page: 5,
            limit: 10,
            total: 12,
            total_pages: 2,
        };
        assert!(!past_end.is_consistent());
    }

    #[test]
    fn test_wire_format_uses_total_pages_key() {
        let window = PageWindow::new(vec![1], 2, 1, 3);
        let value = serde_json::to_value(&window).unwrap();
        assert_eq!(value["totalPages"], 3);

        let parsed: PageWindow<u32> = serde_json::from_value(serde_json::json!({
            "data": [7],
            "page": 1,
            "limit": 10,
            "total": 1,
            "totalPages": 1
        }))
        .unwrap();
        assert_eq!(parsed.data, vec![7]);
    }
}
