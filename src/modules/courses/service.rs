use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AssignInstructorInput, Course, CourseId, CourseListParams, CreateCourseInput,
    RegisteredStudent, SessionId, StaffId, SuccessResponse, UpdateCourseInput,
};

use crate::api::{ApiClient, Endpoint};

const COURSES: &str = "/admin/courses";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(api))]
    pub async fn list_courses(
        api: &ApiClient,
        params: &CourseListParams,
    ) -> Result<PaginatedResponse<Course>, ApiError> {
        api.get_with(COURSES, params).await
    }

    #[instrument(skip(api), fields(course.id = %course_id))]
    pub async fn get_course(api: &ApiClient, course_id: &CourseId) -> Result<Course, ApiError> {
        api.get(Endpoint::new(COURSES).push(course_id)).await
    }

    #[instrument(skip(api))]
    pub async fn get_course_by_code(api: &ApiClient, code: &str) -> Result<Course, ApiError> {
        api.get(Endpoint::new(COURSES).push("code").push(code)).await
    }

    #[instrument(skip(api, input), fields(course.code = %input.code))]
    pub async fn create_course(
        api: &ApiClient,
        input: &CreateCourseInput,
    ) -> Result<Course, ApiError> {
        api.post(COURSES, input).await
    }

    #[instrument(skip(api, input), fields(course.id = %course_id))]
    pub async fn update_course(
        api: &ApiClient,
        course_id: &CourseId,
        input: &UpdateCourseInput,
    ) -> Result<Course, ApiError> {
        api.patch(Endpoint::new(COURSES).push(course_id), input).await
    }

    #[instrument(skip(api), fields(course.id = %course_id))]
    pub async fn delete_course(
        api: &ApiClient,
        course_id: &CourseId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(COURSES).push(course_id)).await
    }

    #[instrument(skip(api, input), fields(course.id = %course_id, instructor.id = %input.instructor_id))]
    pub async fn assign_instructor(
        api: &ApiClient,
        course_id: &CourseId,
        input: &AssignInstructorInput,
    ) -> Result<SuccessResponse, ApiError> {
        api.post(Endpoint::new(COURSES).push(course_id).push("instructors"), input)
            .await
    }

    #[instrument(skip(api), fields(course.id = %course_id, instructor.id = %instructor_id))]
    pub async fn remove_instructor(
        api: &ApiClient,
        course_id: &CourseId,
        instructor_id: &StaffId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(COURSES).push(course_id).push("instructors").push(instructor_id))
            .await
    }

    /// Students registered on a course in one session.
    #[instrument(skip(api), fields(course.id = %course_id, session.id = %session_id))]
    pub async fn registered_students(
        api: &ApiClient,
        course_id: &CourseId,
        session_id: &SessionId,
    ) -> Result<PaginatedResponse<RegisteredStudent>, ApiError> {
        api.get_query(
            Endpoint::new(COURSES).push(course_id).push("students"),
            &[("sessionId", session_id.to_string())],
        )
        .await
    }
}
