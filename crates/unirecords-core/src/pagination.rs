//! Pagination utilities for list endpoints.
//!
//! Every list endpoint of the records backend accepts the same page-based
//! query parameters and answers with the same envelope:
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "total": 42, "page": 2, "limit": 10, "totalPages": 5 }
//! }
//! ```
//!
//! # Query parameters
//!
//! - `page`: Page number (1-indexed)
//! - `limit`: Items per page
//! - `search`: Free-text search
//! - `sortBy` / `sortOrder`: Sort field and direction
//!
//! Absent values are never sent. A blank `search` counts as absent, so a list
//! page whose search box was cleared addresses the same data (and the same
//! cache entry) as one that never had a search term.

use serde::{Deserialize, Serialize};

/// A closed set of query parameters for one list endpoint.
///
/// The pairs drive both the HTTP query string and the list cache key, so two
/// parameter values produce the same pairs exactly when they request the same
/// data. Implementations must emit each field under its own distinct name and
/// skip fields that are unset.
pub trait QueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Page-based pagination and search shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text search term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Field to sort by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl PaginationParams {
    /// Parameters for a specific page, with the backend's default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            ..Self::default()
        }
    }

    /// Parameters requesting up to `limit` items of the first page.
    ///
    /// Used by selects that need "all" items of a small collection.
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    /// The trimmed search term, or `None` when it is blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl QueryParams for PaginationParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search_term() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sortBy", sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sortOrder", order.as_str().to_string()));
        }

        pairs
    }
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of pages
    pub total_pages: u32,
}

/// List envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether there are pages after the current one.
    pub fn has_more(&self) -> bool {
        self.meta.page < self.meta.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Appends a pair when the optional value is present.
///
/// Small helper for [`QueryParams`] implementations.
pub fn push_opt<V: ToString>(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<V>) {
    if let Some(value) = value {
        pairs.push((name, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_send_nothing() {
        assert!(PaginationParams::default().query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_use_wire_names() {
        let params = PaginationParams::page(3)
            .with_limit(25)
            .with_search("ada")
            .with_sort("name", SortOrder::Desc);

        assert_eq!(
            params.query_pairs(),
            vec![
                ("page", "3".to_string()),
                ("limit", "25".to_string()),
                ("search", "ada".to_string()),
                ("sortBy", "name".to_string()),
                ("sortOrder", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let blank = PaginationParams::default().with_search("   ");
        assert_eq!(blank.query_pairs(), PaginationParams::default().query_pairs());
    }

    #[test]
    fn test_search_is_trimmed() {
        let params = PaginationParams::default().with_search("  turing ");
        assert_eq!(params.query_pairs(), vec![("search", "turing".to_string())]);
    }

    #[test]
    fn test_page_is_clamped_to_one() {
        assert_eq!(PaginationParams::page(0).page, Some(1));
    }

    #[test]
    fn test_paginated_response_deserializes_camel_case_meta() {
        let json = r#"{"data":[1,2],"meta":{"total":12,"page":1,"limit":2,"totalPages":6}}"#;
        let page: PaginatedResponse<u32> = serde_json::from_str(json).unwrap();

        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.meta.total_pages, 6);
        assert!(page.has_more());
    }

    #[test]
    fn test_last_page_has_no_more() {
        let page = PaginatedResponse::<u32> {
            data: vec![],
            meta: PaginationMeta {
                total: 0,
                page: 1,
                limit: 10,
                total_pages: 1,
            },
        };
        assert!(!page.has_more());
        assert!(page.is_empty());
    }
}
