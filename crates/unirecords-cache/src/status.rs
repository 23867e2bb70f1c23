//! View state derived from a query result.
//!
//! A list page shows a skeleton while loading, an empty state for an empty
//! page, and an error banner only for real failures. A detail page whose
//! entity does not exist shows a "not found" state instead of an error.

use unirecords_core::{ApiError, PaginatedResponse};

/// Collections that can be empty.
pub trait Collection {
    fn is_empty_collection(&self) -> bool;
}

impl<T> Collection for Vec<T> {
    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Collection for PaginatedResponse<T> {
    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

impl<C: Collection + ?Sized> Collection for std::sync::Arc<C> {
    fn is_empty_collection(&self) -> bool {
        (**self).is_empty_collection()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus<T> {
    Loading,
    Empty,
    NotFound,
    Error(ApiError),
    Ready(T),
}

impl<T> QueryStatus<T> {
    /// Status of a single-entity query.
    pub fn detail(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(e) => Self::Error(e),
        }
    }

    /// Status of a list query. A 404 on a list is an error, not an empty
    /// state.
    pub fn list(result: Result<T, ApiError>) -> Self
    where
        T: Collection,
    {
        match result {
            Ok(data) if data.is_empty_collection() => Self::Empty,
            Ok(data) => Self::Ready(data),
            Err(e) => Self::Error(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryStatus<U> {
        match self {
            Self::Loading => QueryStatus::Loading,
            Self::Empty => QueryStatus::Empty,
            Self::NotFound => QueryStatus::NotFound,
            Self::Error(e) => QueryStatus::Error(e),
            Self::Ready(data) => QueryStatus::Ready(f(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_missing_detail_is_not_an_error() {
        let status = QueryStatus::<u32>::detail(Err(ApiError::not_found("Department not found")));
        assert_eq!(status, QueryStatus::NotFound);
        assert!(status.error().is_none());
    }

    #[test]
    fn test_list_states() {
        assert_eq!(QueryStatus::list(Ok(Vec::<u32>::new())), QueryStatus::Empty);
        assert_eq!(QueryStatus::list(Ok(Arc::new(vec![1]))).map(|v| v.len()), QueryStatus::Ready(1));

        let failed = QueryStatus::<Vec<u32>>::list(Err(ApiError::not_found("gone")));
        assert!(failed.error().is_some());
    }

    #[test]
    fn test_generic_failure_is_an_error() {
        let status = QueryStatus::<u32>::detail(Err(ApiError::Request {
            status: 500,
            message: "boom".to_string(),
        }));
        assert_eq!(status.error().map(|e| e.to_string()), Some("boom".to_string()));
        assert!(QueryStatus::<u32>::Loading.is_loading());
        assert!(QueryStatus::<u32>::Loading.data().is_none());
    }
}
