use unirecords_models::{
    BulkPromoteInput, BulkUploadResult, CreateStudentInput, Student, StudentId, StudentStatus,
    UpdateStudentInput,
};

use super::service::StudentService;
use super::{
    BULK_PROMOTE_STUDENTS, BULK_UPLOAD_STUDENTS, CREATE_STUDENT, DELETE_STUDENT, PROMOTE_STUDENT,
    UPDATE_STUDENT, UPDATE_STUDENT_STATUS,
};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_student(&self, input: &CreateStudentInput) -> ActionResult<Student> {
        self.run(
            CREATE_STUDENT,
            input,
            StudentService::create_student(self.api(), input),
            |_| vec![routes::STUDENTS.to_string()],
        )
        .await
    }

    pub async fn update_student(
        &self,
        student_id: &StudentId,
        input: &UpdateStudentInput,
    ) -> ActionResult<Student> {
        self.run(
            UPDATE_STUDENT,
            input,
            StudentService::update_student(self.api(), student_id, input),
            |_| student_pages(student_id),
        )
        .await
    }

    pub async fn delete_student(&self, student_id: &StudentId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_STUDENT,
                StudentService::delete_student(self.api(), student_id),
                |_| vec![routes::STUDENTS.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn promote_student(&self, student_id: &StudentId, level: u32) -> ActionResult<()> {
        let result = self
            .perform(
                PROMOTE_STUDENT,
                StudentService::promote_student(self.api(), student_id, level),
                |_| student_pages(student_id),
            )
            .await;
        acknowledged(result)
    }

    pub async fn update_student_status(
        &self,
        student_id: &StudentId,
        status: StudentStatus,
    ) -> ActionResult<()> {
        let result = self
            .perform(
                UPDATE_STUDENT_STATUS,
                StudentService::update_status(self.api(), student_id, status),
                |_| student_pages(student_id),
            )
            .await;
        acknowledged(result)
    }

    pub async fn bulk_promote_students(&self, input: &BulkPromoteInput) -> ActionResult<()> {
        let result = self
            .run(
                BULK_PROMOTE_STUDENTS,
                input,
                StudentService::bulk_promote(self.api(), input),
                |_| {
                    let mut paths = vec![routes::STUDENTS.to_string()];
                    paths.extend(input.student_ids.iter().map(|id| routes::student(id.as_str())));
                    paths
                },
            )
            .await;
        acknowledged(result)
    }

    pub async fn bulk_upload_students(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ActionResult<BulkUploadResult> {
        if contents.is_empty() {
            return ActionResult::failure("No file provided");
        }
        self.perform(
            BULK_UPLOAD_STUDENTS,
            StudentService::bulk_upload(self.api(), file_name, contents),
            |_| vec![routes::STUDENTS.to_string()],
        )
        .await
    }
}

fn student_pages(student_id: &StudentId) -> Vec<String> {
    vec![
        routes::STUDENTS.to_string(),
        routes::student(student_id.as_str()),
    ]
}
