//! Query and mutation layer used by the dashboard views.
//!
//! [`Dashboard`] ties the backend client, one [`QueryClient`] and a
//! [`Notifier`] together. Reads go through the cache under the keys in
//! [`unirecords_cache::keys`]; writes validate their input, call the backend
//! once and, on success, invalidate every key whose data may now be stale.
//! A failed write leaves the cache alone, reports the error to the notifier
//! and hands the error back unchanged.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use unirecords_cache::{QueryClient, QueryKey};
use unirecords_config::{ClientConfig, QueryCacheConfig};
use unirecords_core::ApiError;

use crate::api::ApiClient;
use crate::metrics::track_mutation;
use crate::modules::admin::AdminQueries;
use crate::modules::courses::CourseQueries;
use crate::modules::governance::GovernanceQueries;
use crate::modules::results::ResultQueries;
use crate::modules::sessions::SessionQueries;
use crate::modules::staff::StaffQueries;
use crate::modules::students::StudentQueries;
use crate::notify::{Notifier, TracingNotifier};

/// Describes one write operation for logging, metrics and notifications.
#[derive(Debug, Clone, Copy)]
pub struct Mutation {
    pub resource: &'static str,
    pub operation: &'static str,
    pub success: &'static str,
    /// Shown when the failure carries no message meant for users.
    pub failure: &'static str,
}

impl Mutation {
    pub const fn new(
        resource: &'static str,
        operation: &'static str,
        success: &'static str,
        failure: &'static str,
    ) -> Self {
        Self {
            resource,
            operation,
            success,
            failure,
        }
    }
}

#[derive(Clone)]
pub struct Dashboard {
    api: ApiClient,
    cache: QueryClient,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("api", &self.api)
            .field("cached_queries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(api: ApiClient, cache: QueryClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            cache,
            notifier,
        }
    }

    /// A dashboard with a fresh cache that logs its notifications.
    pub fn from_config(
        client: &ClientConfig,
        cache: QueryCacheConfig,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(
            ApiClient::new(client)?,
            QueryClient::new(cache),
            Arc::new(TracingNotifier),
        ))
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub fn governance(&self) -> GovernanceQueries<'_> {
        GovernanceQueries::new(self)
    }

    pub fn courses(&self) -> CourseQueries<'_> {
        CourseQueries::new(self)
    }

    pub fn staff(&self) -> StaffQueries<'_> {
        StaffQueries::new(self)
    }

    pub fn students(&self) -> StudentQueries<'_> {
        StudentQueries::new(self)
    }

    pub fn results(&self) -> ResultQueries<'_> {
        ResultQueries::new(self)
    }

    pub fn sessions(&self) -> SessionQueries<'_> {
        SessionQueries::new(self)
    }

    pub fn admin(&self) -> AdminQueries<'_> {
        AdminQueries::new(self)
    }

    /// Reads `key` through the cache, calling `fetch` with a client handle
    /// when the cached copy is missing or stale.
    pub(crate) async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: Fn(ApiClient) -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let api = self.api.clone();
        self.cache.fetch(key, move || fetch(api.clone())).await
    }

    /// Runs a validated write.
    ///
    /// `stale` computes the keys to invalidate from the backend's response.
    pub(crate) async fn mutate<V, T, Fut, S>(
        &self,
        mutation: Mutation,
        input: &V,
        request: Fut,
        stale: S,
    ) -> Result<T, ApiError>
    where
        V: Validate + ?Sized,
        Fut: Future<Output = Result<T, ApiError>>,
        S: FnOnce(&T) -> Vec<QueryKey>,
    {
        if let Err(errors) = input.validate() {
            return Err(self.fail(mutation, ApiError::from(errors)));
        }
        self.execute(mutation, request, stale).await
    }

    /// Runs a write whose input needs no local validation.
    pub(crate) async fn execute<T, Fut, S>(
        &self,
        mutation: Mutation,
        request: Fut,
        stale: S,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
        S: FnOnce(&T) -> Vec<QueryKey>,
    {
        match request.await {
            Ok(value) => {
                let keys = stale(&value);
                let invalidated = self.cache.invalidate_all(&keys);
                info!(
                    mutation.resource = mutation.resource,
                    mutation.operation = mutation.operation,
                    cache.prefixes = keys.len(),
                    cache.invalidated = invalidated,
                    "Mutation succeeded"
                );
                track_mutation(mutation.resource, mutation.operation, true);
                self.notifier.success(mutation.success);
                Ok(value)
            }
            Err(error) => Err(self.fail(mutation, error)),
        }
    }

    fn fail(&self, mutation: Mutation, error: ApiError) -> ApiError {
        warn!(
            mutation.resource = mutation.resource,
            mutation.operation = mutation.operation,
            http.status = ?error.status(),
            error = %error,
            "Mutation failed"
        );
        track_mutation(mutation.resource, mutation.operation, false);
        self.notifier.error(&error.user_message(mutation.failure));
        error
    }
}
