use std::sync::Arc;

use tracing::instrument;

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AcademicSession, CreateSessionInput, SessionId, SessionListParams, SuccessResponse,
    UpdateSessionInput,
};

use super::service::SessionService;
use super::{ACTIVATE_SESSION, CREATE_SESSION, DELETE_SESSION, UPDATE_SESSION};
use crate::dashboard::Dashboard;

pub struct SessionQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> SessionQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: &SessionListParams,
    ) -> Result<Arc<PaginatedResponse<AcademicSession>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::sessions::list(&params), move |api| {
                let params = params.clone();
                async move { SessionService::list_sessions(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(session.id = %session_id))]
    pub async fn get(&self, session_id: &SessionId) -> Result<Arc<AcademicSession>, ApiError> {
        let id = session_id.clone();
        self.dashboard
            .query(keys::sessions::detail(session_id), move |api| {
                let id = id.clone();
                async move { SessionService::get_session(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Arc<AcademicSession>, ApiError> {
        self.dashboard
            .query(keys::sessions::active(), |api| async move {
                SessionService::active_session(&api).await
            })
            .await
    }

    pub async fn create(&self, input: &CreateSessionInput) -> Result<AcademicSession, ApiError> {
        self.dashboard
            .mutate(
                CREATE_SESSION,
                input,
                SessionService::create_session(self.dashboard.api(), input),
                |_| vec![keys::sessions::lists(), keys::sessions::active()],
            )
            .await
    }

    pub async fn update(
        &self,
        session_id: &SessionId,
        input: &UpdateSessionInput,
    ) -> Result<AcademicSession, ApiError> {
        self.dashboard
            .mutate(
                UPDATE_SESSION,
                input,
                SessionService::update_session(self.dashboard.api(), session_id, input),
                |_| session_keys(session_id),
            )
            .await
    }

    pub async fn delete(&self, session_id: &SessionId) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                DELETE_SESSION,
                SessionService::delete_session(self.dashboard.api(), session_id),
                |_| session_keys(session_id),
            )
            .await
    }

    /// Activating one session deactivates the others, so every cached
    /// session view goes stale along with the dashboard totals.
    pub async fn activate(&self, session_id: &SessionId) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                ACTIVATE_SESSION,
                SessionService::activate_session(self.dashboard.api(), session_id),
                |_| vec![keys::sessions::all(), keys::admin::stats()],
            )
            .await
    }
}

fn session_keys(session_id: &SessionId) -> Vec<QueryKey> {
    vec![
        keys::sessions::lists(),
        keys::sessions::detail(session_id),
        keys::sessions::active(),
    ]
}
