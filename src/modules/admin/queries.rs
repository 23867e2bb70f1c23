use std::sync::Arc;

use tracing::{info, instrument};

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AdminStats, AdminUser, AdminUserListParams, AuditLog, AuditLogListParams, BanUserInput,
    CreateUserInput, SuccessResponse, UpdateUserInput, UserId,
};

use super::service::AdminService;
use super::{
    BAN_USER, CREATE_USER, DELETE_USER, IMPERSONATE_USER, STOP_IMPERSONATION, UNBAN_USER,
    UPDATE_USER,
};
use crate::dashboard::Dashboard;

pub struct AdminQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> AdminQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<Arc<AdminStats>, ApiError> {
        self.dashboard
            .query(keys::admin::stats(), |api| async move {
                AdminService::dashboard_stats(&api).await
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn users(
        &self,
        params: &AdminUserListParams,
    ) -> Result<Arc<PaginatedResponse<AdminUser>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::admin_users::list(&params), move |api| {
                let params = params.clone();
                async move { AdminService::list_users(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(user.id = %user_id))]
    pub async fn user(&self, user_id: &UserId) -> Result<Arc<AdminUser>, ApiError> {
        let id = user_id.clone();
        self.dashboard
            .query(keys::admin_users::detail(user_id), move |api| {
                let id = id.clone();
                async move { AdminService::get_user(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn audit_logs(
        &self,
        params: &AuditLogListParams,
    ) -> Result<Arc<PaginatedResponse<AuditLog>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::audit_logs::list(&params), move |api| {
                let params = params.clone();
                async move { AdminService::audit_logs(&api, &params).await }
            })
            .await
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> Result<AdminUser, ApiError> {
        self.dashboard
            .mutate(
                CREATE_USER,
                input,
                AdminService::create_user(self.dashboard.api(), input),
                |_| vec![keys::admin_users::lists(), keys::admin::stats()],
            )
            .await
    }

    pub async fn update_user(
        &self,
        user_id: &UserId,
        input: &UpdateUserInput,
    ) -> Result<AdminUser, ApiError> {
        self.dashboard
            .mutate(
                UPDATE_USER,
                input,
                AdminService::update_user(self.dashboard.api(), user_id, input),
                |_| user_keys(user_id),
            )
            .await
    }

    pub async fn delete_user(&self, user_id: &UserId) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                DELETE_USER,
                AdminService::delete_user(self.dashboard.api(), user_id),
                |_| user_keys(user_id),
            )
            .await
    }

    pub async fn ban_user(&self, input: &BanUserInput) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .mutate(
                BAN_USER,
                input,
                AdminService::ban_user(self.dashboard.api(), input),
                |_| user_keys(&input.user_id),
            )
            .await
    }

    pub async fn unban_user(&self, user_id: &UserId) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                UNBAN_USER,
                AdminService::unban_user(self.dashboard.api(), user_id),
                |_| user_keys(user_id),
            )
            .await
    }

    /// Every cached view belongs to the previous identity, so the whole
    /// cache is dropped once the backend switches users.
    pub async fn impersonate(&self, user_id: &UserId) -> Result<SuccessResponse, ApiError> {
        let response = self
            .dashboard
            .execute(
                IMPERSONATE_USER,
                AdminService::impersonate(self.dashboard.api(), user_id),
                |_| Vec::new(),
            )
            .await?;
        self.dashboard.cache().clear();
        info!(user.id = %user_id, "Cache cleared for impersonated session");
        Ok(response)
    }

    pub async fn stop_impersonation(&self) -> Result<SuccessResponse, ApiError> {
        let response = self
            .dashboard
            .execute(
                STOP_IMPERSONATION,
                AdminService::stop_impersonation(self.dashboard.api()),
                |_| Vec::new(),
            )
            .await?;
        self.dashboard.cache().clear();
        Ok(response)
    }
}

fn user_keys(user_id: &UserId) -> Vec<QueryKey> {
    vec![
        keys::admin_users::lists(),
        keys::admin_users::detail(user_id),
        keys::admin::stats(),
    ]
}
