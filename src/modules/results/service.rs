use serde_json::json;
use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AcademicResult, BulkResultsInput, CountResponse, CreateResultInput, GradeCalculation,
    ResultId, ResultListParams, SemesterResults, SessionId, StudentId, SuccessResponse,
    UpdateResultInput,
};

use crate::api::{ApiClient, Endpoint};

const RESULTS: &str = "/api/results";

pub struct ResultService;

impl ResultService {
    #[instrument(skip(api))]
    pub async fn list_results(
        api: &ApiClient,
        params: &ResultListParams,
    ) -> Result<PaginatedResponse<AcademicResult>, ApiError> {
        api.get_with(RESULTS, params).await
    }

    #[instrument(skip(api), fields(result.id = %result_id))]
    pub async fn get_result(api: &ApiClient, result_id: &ResultId) -> Result<AcademicResult, ApiError> {
        api.get(Endpoint::new(RESULTS).push(result_id)).await
    }

    #[instrument(skip(api, input), fields(student.id = %input.student_id, course.id = %input.course_id))]
    pub async fn create_result(
        api: &ApiClient,
        input: &CreateResultInput,
    ) -> Result<AcademicResult, ApiError> {
        api.post(RESULTS, input).await
    }

    /// Uploads many results at once; the body is the bare array of rows.
    #[instrument(skip(api, input), fields(rows = input.results.len()))]
    pub async fn create_bulk_results(
        api: &ApiClient,
        input: &BulkResultsInput,
    ) -> Result<CountResponse, ApiError> {
        api.post(Endpoint::new(RESULTS).push("bulk"), &input.results).await
    }

    #[instrument(skip(api, input), fields(result.id = %result_id))]
    pub async fn update_result(
        api: &ApiClient,
        result_id: &ResultId,
        input: &UpdateResultInput,
    ) -> Result<AcademicResult, ApiError> {
        api.patch(Endpoint::new(RESULTS).push(result_id), input).await
    }

    #[instrument(skip(api), fields(result.id = %result_id))]
    pub async fn delete_result(
        api: &ApiClient,
        result_id: &ResultId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(RESULTS).push(result_id)).await
    }

    #[instrument(skip(api))]
    pub async fn calculate_grade(api: &ApiClient, score: f64) -> Result<GradeCalculation, ApiError> {
        api.post(Endpoint::new(RESULTS).push("calculate-grade"), &json!({ "score": score }))
            .await
    }

    #[instrument(skip(api), fields(student.id = %student_id, session.id = %session_id))]
    pub async fn semester_results(
        api: &ApiClient,
        student_id: &StudentId,
        session_id: &SessionId,
        semester: u8,
    ) -> Result<SemesterResults, ApiError> {
        api.get_query(
            Endpoint::new(RESULTS).push("semester").push(student_id),
            &[
                ("sessionId", session_id.to_string()),
                ("semester", semester.to_string()),
            ],
        )
        .await
    }
}
