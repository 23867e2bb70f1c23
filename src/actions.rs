//! Server actions.
//!
//! An action performs one write against the backend with the server's
//! credentials and reports the outcome as an [`ActionResult`] instead of an
//! error. On success it marks every dashboard page that shows the written
//! resource for regeneration through a [`Revalidator`].
//!
//! The per-resource actions live next to their services in
//! [`crate::modules`].

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, info, warn};
use validator::Validate;

use unirecords_core::{ApiError, FieldErrors};

use crate::api::ApiClient;
use crate::dashboard::Mutation;
use crate::metrics::track_mutation;

/// Outcome of a server action.
///
/// Serialises as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "...", "errors": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success { data: Option<T> },
    Failure {
        error: String,
        errors: Option<FieldErrors>,
    },
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data: Some(data) }
    }

    /// Success without a payload, for deletes and state transitions.
    pub fn done() -> Self {
        Self::Success { data: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            errors: None,
        }
    }

    /// Converts an error, keeping per-field messages when there are any.
    pub fn from_error(error: &ApiError, fallback: &str) -> Self {
        Self::Failure {
            error: error.user_message(fallback),
            errors: error.field_errors().cloned(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => data.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { errors, .. } => errors.as_ref(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        match self {
            Self::Success { data } => ActionResult::Success { data: data.map(f) },
            Self::Failure { error, errors } => ActionResult::Failure { error, errors },
        }
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { data } => {
                let len = if data.is_some() { 2 } else { 1 };
                let mut state = serializer.serialize_struct("ActionResult", len)?;
                state.serialize_field("success", &true)?;
                if let Some(data) = data {
                    state.serialize_field("data", data)?;
                }
                state.end()
            }
            Self::Failure { error, errors } => {
                let len = if errors.is_some() { 3 } else { 2 };
                let mut state = serializer.serialize_struct("ActionResult", len)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                if let Some(errors) = errors {
                    state.serialize_field("errors", errors)?;
                }
                state.end()
            }
        }
    }
}

/// Marks server-rendered pages as needing regeneration.
pub trait Revalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

/// Collects the paths marked stale so a renderer can rebuild them.
#[derive(Debug, Default, Clone)]
pub struct PathRevalidator {
    stale: Arc<Mutex<BTreeSet<String>>>,
}

impl PathRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stale(&self, path: &str) -> bool {
        self.lock().contains(path)
    }

    /// Stale paths in lexical order, without clearing them.
    pub fn stale_paths(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Returns the stale paths and forgets them, as a renderer does once it
    /// has rebuilt the pages.
    pub fn take_stale(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock()).into_iter().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.stale
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Revalidator for PathRevalidator {
    fn revalidate_path(&self, path: &str) {
        debug!(path, "Page marked for regeneration");
        self.lock().insert(path.to_string());
    }
}

#[derive(Clone)]
pub struct Actions {
    api: ApiClient,
    revalidator: Arc<dyn Revalidator>,
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl Actions {
    pub fn new(api: ApiClient, revalidator: Arc<dyn Revalidator>) -> Self {
        Self { api, revalidator }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Validates `input`, then runs the write.
    pub(crate) async fn run<V, T, Fut, P>(
        &self,
        action: Mutation,
        input: &V,
        request: Fut,
        paths: P,
    ) -> ActionResult<T>
    where
        V: Validate + ?Sized,
        Fut: Future<Output = Result<T, ApiError>>,
        P: FnOnce(&T) -> Vec<String>,
    {
        if let Err(errors) = input.validate() {
            return self.fail(action, &ApiError::from(errors));
        }
        self.perform(action, request, paths).await
    }

    /// Runs a write whose input needs no local validation.
    pub(crate) async fn perform<T, Fut, P>(
        &self,
        action: Mutation,
        request: Fut,
        paths: P,
    ) -> ActionResult<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
        P: FnOnce(&T) -> Vec<String>,
    {
        match request.await {
            Ok(value) => {
                let paths = paths(&value);
                for path in &paths {
                    self.revalidator.revalidate_path(path);
                }
                info!(
                    action.resource = action.resource,
                    action.operation = action.operation,
                    revalidated = paths.len(),
                    "Action succeeded"
                );
                track_mutation(action.resource, action.operation, true);
                ActionResult::success(value)
            }
            Err(error) => self.fail(action, &error),
        }
    }

    fn fail<T>(&self, action: Mutation, error: &ApiError) -> ActionResult<T> {
        warn!(
            action.resource = action.resource,
            action.operation = action.operation,
            http.status = ?error.status(),
            error = %error,
            "Action failed"
        );
        track_mutation(action.resource, action.operation, false);
        ActionResult::from_error(error, action.failure)
    }
}

/// Drops the payload of an acknowledgement so it serialises as `{success: true}`.
pub(crate) fn acknowledged<T>(result: ActionResult<T>) -> ActionResult<()> {
    match result {
        ActionResult::Success { .. } => ActionResult::done(),
        ActionResult::Failure { error, errors } => ActionResult::Failure { error, errors },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use unirecords_config::ClientConfig;

    const CREATE: Mutation = Mutation::new(
        "faculty",
        "create",
        "Faculty created successfully",
        "Failed to create faculty",
    );

    fn actions() -> (Actions, PathRevalidator) {
        let revalidator = PathRevalidator::new();
        let api = ApiClient::new(&ClientConfig::default()).unwrap();
        (Actions::new(api, Arc::new(revalidator.clone())), revalidator)
    }

    #[test]
    fn test_success_shape() {
        let result = ActionResult::success(json!({"id": "fac_1"}));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": {"id": "fac_1"}})
        );
        assert_eq!(
            serde_json::to_value(ActionResult::<()>::done()).unwrap(),
            json!({"success": true})
        );
    }

    #[test]
    fn test_failure_shape_keeps_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("code".to_string(), vec!["Code already taken".to_string()]);
        let error = ApiError::Validation {
            status: 400,
            message: "Invalid faculty".to_string(),
            errors,
        };

        let result = ActionResult::<()>::from_error(&error, "Failed to create faculty");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "Invalid faculty", "errors": {"code": ["Code already taken"]}})
        );

        let plain = ActionResult::<()>::failure("Failed to delete faculty");
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"success": false, "error": "Failed to delete faculty"})
        );
    }

    #[test]
    fn test_revalidator_take_clears() {
        let revalidator = PathRevalidator::new();
        revalidator.revalidate_path("/dashboard/courses");
        revalidator.revalidate_path("/dashboard/courses");
        revalidator.revalidate_path("/dashboard");

        assert!(revalidator.is_stale("/dashboard/courses"));
        assert_eq!(
            revalidator.take_stale(),
            vec!["/dashboard".to_string(), "/dashboard/courses".to_string()]
        );
        assert!(!revalidator.is_stale("/dashboard"));
    }

    #[tokio::test]
    async fn test_failed_action_revalidates_nothing() {
        let (actions, revalidator) = actions();

        let result = actions
            .perform(
                CREATE,
                async {
                    Err::<(), _>(ApiError::Request {
                        status: 500,
                        message: "Internal server error".to_string(),
                    })
                },
                |_| vec!["/dashboard/governance/faculties".to_string()],
            )
            .await;

        assert_eq!(result.error(), Some("Internal server error"));
        assert!(revalidator.stale_paths().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_becomes_field_errors() {
        let (actions, revalidator) = actions();
        let input = unirecords_models::CreateFacultyInput::new("Faculty of Science", "");

        let result = actions
            .run(CREATE, &input, async { Ok(()) }, |_| vec!["/dashboard".to_string()])
            .await;

        assert!(!result.is_success());
        assert!(result.field_errors().is_some_and(|e| e.contains_key("code")));
        assert!(revalidator.stale_paths().is_empty());
    }
}
