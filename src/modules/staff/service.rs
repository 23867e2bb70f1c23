use bytes::Bytes;
use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    BulkUploadResult, Course, CreateStaffInput, ExportFormat, Staff, StaffId, StaffListParams,
    StaffStats, SuccessResponse, UpdateStaffInput,
};

use crate::api::{ApiClient, Endpoint};

const STAFF: &str = "/admin/staff";

pub struct StaffService;

impl StaffService {
    #[instrument(skip(api))]
    pub async fn list_staff(
        api: &ApiClient,
        params: &StaffListParams,
    ) -> Result<PaginatedResponse<Staff>, ApiError> {
        api.get_with(STAFF, params).await
    }

    #[instrument(skip(api), fields(staff.id = %staff_id))]
    pub async fn get_staff(api: &ApiClient, staff_id: &StaffId) -> Result<Staff, ApiError> {
        api.get(Endpoint::new(STAFF).push(staff_id)).await
    }

    #[instrument(skip(api, input), fields(staff.number = %input.staff_number))]
    pub async fn create_staff(api: &ApiClient, input: &CreateStaffInput) -> Result<Staff, ApiError> {
        api.post(STAFF, input).await
    }

    #[instrument(skip(api, input), fields(staff.id = %staff_id))]
    pub async fn update_staff(
        api: &ApiClient,
        staff_id: &StaffId,
        input: &UpdateStaffInput,
    ) -> Result<Staff, ApiError> {
        api.patch(Endpoint::new(STAFF).push(staff_id), input).await
    }

    #[instrument(skip(api), fields(staff.id = %staff_id))]
    pub async fn delete_staff(
        api: &ApiClient,
        staff_id: &StaffId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(STAFF).push(staff_id)).await
    }

    #[instrument(skip(api))]
    pub async fn staff_stats(api: &ApiClient) -> Result<StaffStats, ApiError> {
        api.get(Endpoint::new(STAFF).push("stats")).await
    }

    /// Courses the staff member is assigned to teach.
    #[instrument(skip(api), fields(staff.id = %staff_id))]
    pub async fn staff_courses(api: &ApiClient, staff_id: &StaffId) -> Result<Vec<Course>, ApiError> {
        api.get(Endpoint::new(STAFF).push(staff_id).push("courses")).await
    }

    #[instrument(skip(api, contents), fields(file.name = %file_name, file.size = contents.len()))]
    pub async fn bulk_upload(
        api: &ApiClient,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadResult, ApiError> {
        api.post_file(Endpoint::new(STAFF).push("bulk-upload"), file_name, contents)
            .await
    }

    #[instrument(skip(api))]
    pub async fn download_template(api: &ApiClient, format: ExportFormat) -> Result<Bytes, ApiError> {
        api.get_bytes(
            Endpoint::new(STAFF).push("bulk-upload").push("template"),
            &[("format", format.to_string())],
        )
        .await
    }

    #[instrument(skip(api))]
    pub async fn export_staff(api: &ApiClient, format: ExportFormat) -> Result<Bytes, ApiError> {
        api.get_bytes(Endpoint::new(STAFF).push("export"), &[("format", format.to_string())])
            .await
    }
}
