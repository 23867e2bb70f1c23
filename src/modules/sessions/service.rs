use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AcademicSession, CreateSessionInput, SessionId, SessionListParams, SuccessResponse,
    UpdateSessionInput,
};

use crate::api::{ApiClient, Endpoint};

const SESSIONS: &str = "/api/sessions";

pub struct SessionService;

impl SessionService {
    #[instrument(skip(api))]
    pub async fn list_sessions(
        api: &ApiClient,
        params: &SessionListParams,
    ) -> Result<PaginatedResponse<AcademicSession>, ApiError> {
        api.get_with(SESSIONS, params).await
    }

    #[instrument(skip(api), fields(session.id = %session_id))]
    pub async fn get_session(
        api: &ApiClient,
        session_id: &SessionId,
    ) -> Result<AcademicSession, ApiError> {
        api.get(Endpoint::new(SESSIONS).push(session_id)).await
    }

    #[instrument(skip(api))]
    pub async fn active_session(api: &ApiClient) -> Result<AcademicSession, ApiError> {
        api.get(Endpoint::new(SESSIONS).push("active")).await
    }

    #[instrument(skip(api, input), fields(session.label = %input.label))]
    pub async fn create_session(
        api: &ApiClient,
        input: &CreateSessionInput,
    ) -> Result<AcademicSession, ApiError> {
        api.post(SESSIONS, input).await
    }

    #[instrument(skip(api, input), fields(session.id = %session_id))]
    pub async fn update_session(
        api: &ApiClient,
        session_id: &SessionId,
        input: &UpdateSessionInput,
    ) -> Result<AcademicSession, ApiError> {
        api.patch(Endpoint::new(SESSIONS).push(session_id), input).await
    }

    #[instrument(skip(api), fields(session.id = %session_id))]
    pub async fn delete_session(
        api: &ApiClient,
        session_id: &SessionId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(SESSIONS).push(session_id)).await
    }

    /// Makes `session_id` the active session; the backend deactivates the
    /// previous one.
    #[instrument(skip(api), fields(session.id = %session_id))]
    pub async fn activate_session(
        api: &ApiClient,
        session_id: &SessionId,
    ) -> Result<SuccessResponse, ApiError> {
        api.post_empty(Endpoint::new(SESSIONS).push(session_id).push("activate"))
            .await
    }
}
