use std::sync::Arc;

use tracing::instrument;

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AcademicResult, BulkResultsInput, CountResponse, CreateResultInput, GradeCalculation,
    ResultId, ResultListParams, SemesterResults, SessionId, StudentId, SuccessResponse,
    UpdateResultInput,
};

use super::service::ResultService;
use super::{CREATE_BULK_RESULTS, CREATE_RESULT, DELETE_RESULT, UPDATE_RESULT};
use crate::dashboard::Dashboard;

pub struct ResultQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> ResultQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: &ResultListParams,
    ) -> Result<Arc<PaginatedResponse<AcademicResult>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::results::list(&params), move |api| {
                let params = params.clone();
                async move { ResultService::list_results(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(result.id = %result_id))]
    pub async fn get(&self, result_id: &ResultId) -> Result<Arc<AcademicResult>, ApiError> {
        let id = result_id.clone();
        self.dashboard
            .query(keys::results::detail(result_id), move |api| {
                let id = id.clone();
                async move { ResultService::get_result(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self), fields(student.id = %student_id, session.id = %session_id))]
    pub async fn semester(
        &self,
        student_id: &StudentId,
        session_id: &SessionId,
        semester: u8,
    ) -> Result<Arc<SemesterResults>, ApiError> {
        let (student, session) = (student_id.clone(), session_id.clone());
        self.dashboard
            .query(
                keys::results::semester(student_id, session_id, semester),
                move |api| {
                    let (student, session) = (student.clone(), session.clone());
                    async move {
                        ResultService::semester_results(&api, &student, &session, semester).await
                    }
                },
            )
            .await
    }

    /// Asks the backend which grade a score earns. Not cached.
    pub async fn calculate_grade(&self, score: f64) -> Result<GradeCalculation, ApiError> {
        ResultService::calculate_grade(self.dashboard.api(), score).await
    }

    pub async fn create(&self, input: &CreateResultInput) -> Result<AcademicResult, ApiError> {
        self.dashboard
            .mutate(
                CREATE_RESULT,
                input,
                ResultService::create_result(self.dashboard.api(), input),
                |_| result_keys(None, [&input.student_id]),
            )
            .await
    }

    pub async fn create_bulk(&self, input: &BulkResultsInput) -> Result<CountResponse, ApiError> {
        self.dashboard
            .mutate(
                CREATE_BULK_RESULTS,
                input,
                ResultService::create_bulk_results(self.dashboard.api(), input),
                |_| result_keys(None, input.results.iter().map(|r| &r.student_id)),
            )
            .await
    }

    pub async fn update(
        &self,
        result_id: &ResultId,
        input: &UpdateResultInput,
    ) -> Result<AcademicResult, ApiError> {
        self.dashboard
            .mutate(
                UPDATE_RESULT,
                input,
                ResultService::update_result(self.dashboard.api(), result_id, input),
                |result| result_keys(Some(result_id), [&result.student_id]),
            )
            .await
    }

    /// The student's views are only refreshed when the result being removed
    /// is in the cache, since the backend reply does not name its owner.
    pub async fn delete(&self, result_id: &ResultId) -> Result<SuccessResponse, ApiError> {
        let owner = self
            .dashboard
            .cache()
            .get_query_data::<AcademicResult>(&keys::results::detail(result_id))
            .map(|cached| cached.student_id.clone());

        self.dashboard
            .execute(
                DELETE_RESULT,
                ResultService::delete_result(self.dashboard.api(), result_id),
                |_| result_keys(Some(result_id), owner.as_ref()),
            )
            .await
    }
}

/// Result lists, the result itself and every per-student view built from
/// results.
fn result_keys<'s>(
    result_id: Option<&ResultId>,
    students: impl IntoIterator<Item = &'s StudentId>,
) -> Vec<QueryKey> {
    let mut stale = vec![keys::results::lists()];
    stale.extend(result_id.map(keys::results::detail));
    for student in students {
        stale.push(keys::students::results_root(student));
        stale.push(keys::results::semesters(student));
    }
    stale.sort();
    stale.dedup();
    stale
}
