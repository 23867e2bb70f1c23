use std::sync::Arc;

use bytes::Bytes;
use tracing::{instrument, warn};

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AcademicResult, BulkPromoteInput, BulkUploadResult, CreateStudentInput, ExportFormat,
    SessionId, Student, StudentId, StudentListParams, StudentStatus, SuccessResponse,
    UpdateStudentInput,
};

use super::service::StudentService;
use super::{
    BULK_PROMOTE_STUDENTS, BULK_UPLOAD_STUDENTS, CREATE_STUDENT, DELETE_STUDENT, PROMOTE_STUDENT,
    UPDATE_STUDENT, UPDATE_STUDENT_STATUS,
};
use crate::dashboard::Dashboard;

pub struct StudentQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> StudentQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: &StudentListParams,
    ) -> Result<Arc<PaginatedResponse<Student>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::students::list(&params), move |api| {
                let params = params.clone();
                async move { StudentService::list_students(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(student.id = %student_id))]
    pub async fn get(&self, student_id: &StudentId) -> Result<Arc<Student>, ApiError> {
        let id = student_id.clone();
        self.dashboard
            .query(keys::students::detail(student_id), move |api| {
                let id = id.clone();
                async move { StudentService::get_student(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn by_matric(&self, matric_number: &str) -> Result<Arc<Student>, ApiError> {
        let matric = matric_number.to_string();
        self.dashboard
            .query(keys::students::by_matric(matric_number), move |api| {
                let matric = matric.clone();
                async move { StudentService::get_student_by_matric(&api, &matric).await }
            })
            .await
    }

    #[instrument(skip(self), fields(student.id = %student_id))]
    pub async fn results(
        &self,
        student_id: &StudentId,
        session_id: Option<&SessionId>,
    ) -> Result<Arc<Vec<AcademicResult>>, ApiError> {
        let id = student_id.clone();
        let session = session_id.cloned();
        self.dashboard
            .query(keys::students::results(student_id, session_id), move |api| {
                let (id, session) = (id.clone(), session.clone());
                async move { StudentService::student_results(&api, &id, session.as_ref()).await }
            })
            .await
    }

    #[instrument(skip(self), fields(student.id = %student_id))]
    pub async fn transcript(&self, student_id: &StudentId) -> Result<Arc<Bytes>, ApiError> {
        let id = student_id.clone();
        self.dashboard
            .query(keys::students::transcript(student_id), move |api| {
                let id = id.clone();
                async move { StudentService::transcript(&api, &id).await }
            })
            .await
    }

    /// Export file contents. Downloads are never cached.
    pub async fn export(&self, format: ExportFormat) -> Result<Bytes, ApiError> {
        StudentService::export_students(self.dashboard.api(), format).await
    }

    pub async fn template(&self, format: ExportFormat) -> Result<Bytes, ApiError> {
        StudentService::download_template(self.dashboard.api(), format).await
    }

    pub async fn create(&self, input: &CreateStudentInput) -> Result<Student, ApiError> {
        self.dashboard
            .mutate(
                CREATE_STUDENT,
                input,
                StudentService::create_student(self.dashboard.api(), input),
                |_| vec![keys::students::lists()],
            )
            .await
    }

    pub async fn update(
        &self,
        student_id: &StudentId,
        input: &UpdateStudentInput,
    ) -> Result<Student, ApiError> {
        self.dashboard
            .mutate(
                UPDATE_STUDENT,
                input,
                StudentService::update_student(self.dashboard.api(), student_id, input),
                |_| student_keys([student_id]),
            )
            .await
    }

    pub async fn delete(&self, student_id: &StudentId) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                DELETE_STUDENT,
                StudentService::delete_student(self.dashboard.api(), student_id),
                |_| student_keys([student_id]),
            )
            .await
    }

    pub async fn promote(
        &self,
        student_id: &StudentId,
        level: u32,
    ) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                PROMOTE_STUDENT,
                StudentService::promote_student(self.dashboard.api(), student_id, level),
                |_| student_keys([student_id]),
            )
            .await
    }

    pub async fn update_status(
        &self,
        student_id: &StudentId,
        status: StudentStatus,
    ) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                UPDATE_STUDENT_STATUS,
                StudentService::update_status(self.dashboard.api(), student_id, status),
                |_| student_keys([student_id]),
            )
            .await
    }

    pub async fn bulk_promote(&self, input: &BulkPromoteInput) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .mutate(
                BULK_PROMOTE_STUDENTS,
                input,
                StudentService::bulk_promote(self.dashboard.api(), input),
                |_| student_keys(&input.student_ids),
            )
            .await
    }

    pub async fn bulk_upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkUploadResult, ApiError> {
        let report = self
            .dashboard
            .execute(
                BULK_UPLOAD_STUDENTS,
                StudentService::bulk_upload(self.dashboard.api(), file_name, contents),
                |_| vec![keys::students::lists()],
            )
            .await?;

        if report.has_failures() {
            warn!(
                rows.accepted = report.success_count,
                rows.rejected = report.failure_count,
                "Bulk student upload rejected some rows"
            );
        }
        Ok(report)
    }
}

/// Lists, matric lookups and the detail subtree of each student.
fn student_keys<'s>(students: impl IntoIterator<Item = &'s StudentId>) -> Vec<QueryKey> {
    let mut stale = vec![keys::students::lists(), keys::students::by_matrics()];
    stale.extend(students.into_iter().map(keys::students::detail));
    stale
}
