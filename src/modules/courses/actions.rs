use unirecords_models::{
    AssignInstructorInput, Course, CourseId, CreateCourseInput, StaffId, UpdateCourseInput,
};

use super::service::CourseService;
use super::{ASSIGN_INSTRUCTOR, CREATE_COURSE, DELETE_COURSE, REMOVE_INSTRUCTOR, UPDATE_COURSE};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_course(&self, input: &CreateCourseInput) -> ActionResult<Course> {
        self.run(
            CREATE_COURSE,
            input,
            CourseService::create_course(self.api(), input),
            |_| vec![routes::COURSES.to_string()],
        )
        .await
    }

    pub async fn update_course(
        &self,
        course_id: &CourseId,
        input: &UpdateCourseInput,
    ) -> ActionResult<Course> {
        self.run(
            UPDATE_COURSE,
            input,
            CourseService::update_course(self.api(), course_id, input),
            |course| {
                let mut paths = vec![routes::COURSES.to_string()];
                paths.extend(course.instructor_ids().map(|id| routes::staff_member(id.as_str())));
                paths
            },
        )
        .await
    }

    pub async fn delete_course(&self, course_id: &CourseId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_COURSE,
                CourseService::delete_course(self.api(), course_id),
                |_| vec![routes::COURSES.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn assign_instructor(
        &self,
        course_id: &CourseId,
        input: &AssignInstructorInput,
    ) -> ActionResult<()> {
        let result = self
            .run(
                ASSIGN_INSTRUCTOR,
                input,
                CourseService::assign_instructor(self.api(), course_id, input),
                |_| {
                    vec![
                        routes::COURSES.to_string(),
                        routes::staff_member(input.instructor_id.as_str()),
                    ]
                },
            )
            .await;
        acknowledged(result)
    }

    pub async fn remove_instructor(
        &self,
        course_id: &CourseId,
        instructor_id: &StaffId,
    ) -> ActionResult<()> {
        let result = self
            .perform(
                REMOVE_INSTRUCTOR,
                CourseService::remove_instructor(self.api(), course_id, instructor_id),
                |_| {
                    vec![
                        routes::COURSES.to_string(),
                        routes::staff_member(instructor_id.as_str()),
                    ]
                },
            )
            .await;
        acknowledged(result)
    }
}
