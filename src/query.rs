//! Query descriptor for paginated list requests.
//!
//! A [`QueryDescriptor`] captures one list request's pagination, free-text
//! search and structured filters as an immutable value. Descriptors compare
//! field by field, which is what the fetch layer uses to decide whether a
//! parameter change actually requires a new request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page position within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page index.
    pub page: usize,
    /// Rows per page, at least 1.
    pub limit: usize,
}

impl Pagination {
    /// Create a page position, clamping degenerate values into range.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// The first page at the given page size.
    pub fn first(limit: usize) -> Self {
        Self::new(1, limit)
    }

    /// Offset of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// Free-text search over a set of record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Field names the query is matched against, in wire casing.
    pub fields: Vec<String>,
    /// The raw query text as the user entered it.
    pub query: String,
}

/// Immutable description of one list query.
///
/// Rebuilt in full on every parameter change rather than mutated in place.
/// The `search` member is omitted entirely when the query text is blank:
/// "no search" and "search for the empty string" are the same request.
/// Filters live in a [`BTreeMap`] so two descriptors with the same entries
/// compare equal regardless of the order the filters were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, Value>,
}

impl QueryDescriptor {
    /// Compose a descriptor from its three independent axes.
    ///
    /// `search_query` is dropped when blank (empty or whitespace-only).
    /// Filter values are passed through structurally; interpreting them is
    /// the repository's job.
    pub fn build(
        pagination: Pagination,
        search_query: &str,
        search_fields: &[&str],
        filters: BTreeMap<String, Value>,
    ) -> Self {
        let search = if search_query.trim().is_empty() {
            None
        } else {
            Some(SearchSpec {
                fields: search_fields.iter().map(|f| f.to_string()).collect(),
                query: search_query.to_string(),
            })
        };

        Self {
            pagination,
            search,
            filters,
        }
    }

    /// A descriptor with pagination only, no search or filters.
    pub fn paged(page: usize, limit: usize) -> Self {
        Self {
            pagination: Pagination::new(page, limit),
            search: None,
            filters: BTreeMap::new(),
        }
    }

    /// Same query, different page.
    pub fn at_page(&self, page: usize) -> Self {
        Self {
            pagination: Pagination::new(page, self.pagination.limit),
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Whether any search or filter constraint is active.
    pub fn is_constrained(&self) -> bool {
        self.search.is_some() || !self.filters.is_empty()
    }
}
