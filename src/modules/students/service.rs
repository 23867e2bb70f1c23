use bytes::Bytes;
use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AcademicResult, BulkPromoteInput, BulkUploadResult, CreateStudentInput, ExportFormat,
    SessionId, Student, StudentId, StudentListParams, StudentStatus, SuccessResponse,
    UpdateStudentInput,
};

use crate::api::{ApiClient, Endpoint};

const STUDENTS: &str = "/admin/students";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(api))]
    pub async fn list_students(
        api: &ApiClient,
        params: &StudentListParams,
    ) -> Result<PaginatedResponse<Student>, ApiError> {
        api.get_with(STUDENTS, params).await
    }

    #[instrument(skip(api), fields(student.id = %student_id))]
    pub async fn get_student(api: &ApiClient, student_id: &StudentId) -> Result<Student, ApiError> {
        api.get(Endpoint::new(STUDENTS).push(student_id)).await
    }

    #[instrument(skip(api))]
    pub async fn get_student_by_matric(
        api: &ApiClient,
        matric_number: &str,
    ) -> Result<Student, ApiError> {
        api.get(Endpoint::new(STUDENTS).push("matric").push(matric_number)).await
    }

    #[instrument(skip(api, input), fields(student.matric = %input.matric_number))]
    pub async fn create_student(
        api: &ApiClient,
        input: &CreateStudentInput,
    ) -> Result<Student, ApiError> {
        api.post(STUDENTS, input).await
    }

    #[instrument(skip(api, input), fields(student.id = %student_id))]
    pub async fn update_student(
        api: &ApiClient,
        student_id: &StudentId,
        input: &UpdateStudentInput,
    ) -> Result<Student, ApiError> {
        api.patch(Endpoint::new(STUDENTS).push(student_id), input).await
    }

    #[instrument(skip(api), fields(student.id = %student_id))]
    pub async fn delete_student(
        api: &ApiClient,
        student_id: &StudentId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(STUDENTS).push(student_id)).await
    }

    #[instrument(skip(api), fields(student.id = %student_id))]
    pub async fn promote_student(
        api: &ApiClient,
        student_id: &StudentId,
        level: u32,
    ) -> Result<SuccessResponse, ApiError> {
        api.patch_empty(Endpoint::new(STUDENTS).push(student_id).push("promote").push(level))
            .await
    }

    #[instrument(skip(api), fields(student.id = %student_id, status = status.as_str()))]
    pub async fn update_status(
        api: &ApiClient,
        student_id: &StudentId,
        status: StudentStatus,
    ) -> Result<SuccessResponse, ApiError> {
        api.patch_empty(
            Endpoint::new(STUDENTS)
                .push(student_id)
                .push("status")
                .push(status.as_str()),
        )
        .await
    }

    #[instrument(skip(api, input), fields(students = input.student_ids.len(), new_level = input.new_level))]
    pub async fn bulk_promote(
        api: &ApiClient,
        input: &BulkPromoteInput,
    ) -> Result<SuccessResponse, ApiError> {
        api.post(Endpoint::new(STUDENTS).push("bulk-promote"), input).await
    }

    #[instrument(skip(api, contents), fields(file.name = %file_name, file.size = contents.len()))]
    pub async fn bulk_upload(
        api: &ApiClient,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadResult, ApiError> {
        api.post_file(Endpoint::new(STUDENTS).push("bulk-upload"), file_name, contents)
            .await
    }

    #[instrument(skip(api))]
    pub async fn download_template(api: &ApiClient, format: ExportFormat) -> Result<Bytes, ApiError> {
        api.get_bytes(
            Endpoint::new(STUDENTS).push("bulk-upload").push("template"),
            &[("format", format.to_string())],
        )
        .await
    }

    #[instrument(skip(api))]
    pub async fn export_students(api: &ApiClient, format: ExportFormat) -> Result<Bytes, ApiError> {
        api.get_bytes(Endpoint::new(STUDENTS).push("export"), &[("format", format.to_string())])
            .await
    }

    /// A student's results, optionally narrowed to one session.
    #[instrument(skip(api), fields(student.id = %student_id))]
    pub async fn student_results(
        api: &ApiClient,
        student_id: &StudentId,
        session_id: Option<&SessionId>,
    ) -> Result<Vec<AcademicResult>, ApiError> {
        let query: Vec<_> = session_id
            .map(|id| ("sessionId", id.to_string()))
            .into_iter()
            .collect();
        api.get_query(Endpoint::new(STUDENTS).push(student_id).push("results"), &query)
            .await
    }

    /// The transcript document as returned by the backend.
    #[instrument(skip(api), fields(student.id = %student_id))]
    pub async fn transcript(api: &ApiClient, student_id: &StudentId) -> Result<Bytes, ApiError> {
        api.get_bytes(Endpoint::new(STUDENTS).push(student_id).push("transcript"), &[])
            .await
    }
}
