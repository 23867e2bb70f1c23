use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AdminStats, AdminUser, AdminUserListParams, AuditLog, AuditLogListParams, BanUserInput,
    CreateUserInput, SuccessResponse, UpdateUserInput, UserId,
};

use crate::api::{ApiClient, Endpoint};

// The backend lists users under `/admin` but serves every other user
// operation under `/api/admin`.
const USERS_LIST: &str = "/admin/users";
const USERS: &str = "/api/admin/users";

pub struct AdminService;

impl AdminService {
    #[instrument(skip(api))]
    pub async fn dashboard_stats(api: &ApiClient) -> Result<AdminStats, ApiError> {
        api.get("/admin/dashboard").await
    }

    #[instrument(skip(api))]
    pub async fn list_users(
        api: &ApiClient,
        params: &AdminUserListParams,
    ) -> Result<PaginatedResponse<AdminUser>, ApiError> {
        api.get_with(USERS_LIST, params).await
    }

    #[instrument(skip(api), fields(user.id = %user_id))]
    pub async fn get_user(api: &ApiClient, user_id: &UserId) -> Result<AdminUser, ApiError> {
        api.get(Endpoint::new(USERS).push(user_id)).await
    }

    #[instrument(skip(api, input), fields(user.email = %input.email))]
    pub async fn create_user(api: &ApiClient, input: &CreateUserInput) -> Result<AdminUser, ApiError> {
        api.post(USERS, input).await
    }

    #[instrument(skip(api, input), fields(user.id = %user_id))]
    pub async fn update_user(
        api: &ApiClient,
        user_id: &UserId,
        input: &UpdateUserInput,
    ) -> Result<AdminUser, ApiError> {
        api.patch(Endpoint::new(USERS).push(user_id), input).await
    }

    #[instrument(skip(api), fields(user.id = %user_id))]
    pub async fn delete_user(api: &ApiClient, user_id: &UserId) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(USERS).push(user_id)).await
    }

    #[instrument(skip(api, input), fields(user.id = %input.user_id))]
    pub async fn ban_user(api: &ApiClient, input: &BanUserInput) -> Result<SuccessResponse, ApiError> {
        api.post(Endpoint::new(USERS).push("ban"), input).await
    }

    #[instrument(skip(api), fields(user.id = %user_id))]
    pub async fn unban_user(api: &ApiClient, user_id: &UserId) -> Result<SuccessResponse, ApiError> {
        api.post_empty(Endpoint::new(USERS).push(user_id).push("unban")).await
    }

    #[instrument(skip(api))]
    pub async fn audit_logs(
        api: &ApiClient,
        params: &AuditLogListParams,
    ) -> Result<PaginatedResponse<AuditLog>, ApiError> {
        api.get_with("/api/admin/audit-logs", params).await
    }

    #[instrument(skip(api), fields(user.id = %user_id))]
    pub async fn impersonate(api: &ApiClient, user_id: &UserId) -> Result<SuccessResponse, ApiError> {
        api.post_empty(Endpoint::new("/api/admin/impersonate").push(user_id))
            .await
    }

    #[instrument(skip(api))]
    pub async fn stop_impersonation(api: &ApiClient) -> Result<SuccessResponse, ApiError> {
        api.post_empty("/api/admin/stop-impersonation").await
    }
}
