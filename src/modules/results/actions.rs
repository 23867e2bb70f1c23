use unirecords_models::{
    AcademicResult, BulkResultsInput, CountResponse, CreateResultInput, ResultId, StudentId,
    UpdateResultInput,
};

use super::service::ResultService;
use super::{CREATE_BULK_RESULTS, CREATE_RESULT, DELETE_RESULT, UPDATE_RESULT};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_result(&self, input: &CreateResultInput) -> ActionResult<AcademicResult> {
        self.run(
            CREATE_RESULT,
            input,
            ResultService::create_result(self.api(), input),
            |_| result_pages([&input.student_id]),
        )
        .await
    }

    pub async fn create_bulk_results(
        &self,
        input: &BulkResultsInput,
    ) -> ActionResult<CountResponse> {
        self.run(
            CREATE_BULK_RESULTS,
            input,
            ResultService::create_bulk_results(self.api(), input),
            |_| result_pages(input.results.iter().map(|r| &r.student_id)),
        )
        .await
    }

    pub async fn update_result(
        &self,
        result_id: &ResultId,
        input: &UpdateResultInput,
    ) -> ActionResult<AcademicResult> {
        self.run(
            UPDATE_RESULT,
            input,
            ResultService::update_result(self.api(), result_id, input),
            |result| result_pages([&result.student_id]),
        )
        .await
    }

    pub async fn delete_result(&self, result_id: &ResultId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_RESULT,
                ResultService::delete_result(self.api(), result_id),
                |_| vec![routes::RESULTS.to_string()],
            )
            .await;
        acknowledged(result)
    }
}

fn result_pages<'s>(students: impl IntoIterator<Item = &'s StudentId>) -> Vec<String> {
    let mut paths = vec![routes::RESULTS.to_string()];
    for student in students {
        let page = routes::student(student.as_str());
        if !paths.contains(&page) {
            paths.push(page);
        }
    }
    paths
}
