use std::sync::Arc;

use bytes::Bytes;
use tracing::{instrument, warn};

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    BulkUploadResult, Course, CreateStaffInput, ExportFormat, Staff, StaffId, StaffListParams,
    StaffStats, SuccessResponse, UpdateStaffInput,
};

use super::service::StaffService;
use super::{BULK_UPLOAD_STAFF, CREATE_STAFF, DELETE_STAFF, UPDATE_STAFF};
use crate::dashboard::Dashboard;

pub struct StaffQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> StaffQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: &StaffListParams,
    ) -> Result<Arc<PaginatedResponse<Staff>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::staff::list(&params), move |api| {
                let params = params.clone();
                async move { StaffService::list_staff(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(staff.id = %staff_id))]
    pub async fn get(&self, staff_id: &StaffId) -> Result<Arc<Staff>, ApiError> {
        let id = staff_id.clone();
        self.dashboard
            .query(keys::staff::detail(staff_id), move |api| {
                let id = id.clone();
                async move { StaffService::get_staff(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<Arc<StaffStats>, ApiError> {
        self.dashboard
            .query(keys::staff::stats(), |api| async move {
                StaffService::staff_stats(&api).await
            })
            .await
    }

    #[instrument(skip(self), fields(staff.id = %staff_id))]
    pub async fn courses(&self, staff_id: &StaffId) -> Result<Arc<Vec<Course>>, ApiError> {
        let id = staff_id.clone();
        self.dashboard
            .query(keys::staff::courses(staff_id), move |api| {
                let id = id.clone();
                async move { StaffService::staff_courses(&api, &id).await }
            })
            .await
    }

    /// Export file contents. Downloads are never cached.
    pub async fn export(&self, format: ExportFormat) -> Result<Bytes, ApiError> {
        StaffService::export_staff(self.dashboard.api(), format).await
    }

    pub async fn template(&self, format: ExportFormat) -> Result<Bytes, ApiError> {
        StaffService::download_template(self.dashboard.api(), format).await
    }

    pub async fn create(&self, input: &CreateStaffInput) -> Result<Staff, ApiError> {
        self.dashboard
            .mutate(
                CREATE_STAFF,
                input,
                StaffService::create_staff(self.dashboard.api(), input),
                |_| vec![keys::staff::lists(), keys::staff::stats()],
            )
            .await
    }

    pub async fn update(
        &self,
        staff_id: &StaffId,
        input: &UpdateStaffInput,
    ) -> Result<Staff, ApiError> {
        self.dashboard
            .mutate(
                UPDATE_STAFF,
                input,
                StaffService::update_staff(self.dashboard.api(), staff_id, input),
                |_| staff_keys(staff_id),
            )
            .await
    }

    pub async fn delete(&self, staff_id: &StaffId) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                DELETE_STAFF,
                StaffService::delete_staff(self.dashboard.api(), staff_id),
                |_| staff_keys(staff_id),
            )
            .await
    }

    /// Rows are accepted or rejected individually; a report with rejected
    /// rows still counts as a successful upload.
    pub async fn bulk_upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadResult, ApiError> {
        let report = self
            .dashboard
            .execute(
                BULK_UPLOAD_STAFF,
                StaffService::bulk_upload(self.dashboard.api(), file_name, contents),
                |_| vec![keys::staff::lists(), keys::staff::stats()],
            )
            .await?;

        if report.has_failures() {
            warn!(
                rows.accepted = report.success_count,
                rows.rejected = report.failure_count,
                "Bulk staff upload rejected some rows"
            );
        }
        Ok(report)
    }
}

fn staff_keys(staff_id: &StaffId) -> Vec<QueryKey> {
    vec![
        keys::staff::lists(),
        keys::staff::detail(staff_id),
        keys::staff::stats(),
    ]
}
