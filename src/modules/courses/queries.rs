use std::sync::Arc;

use tracing::instrument;

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    AssignInstructorInput, Course, CourseId, CourseListParams, CreateCourseInput,
    RegisteredStudent, SessionId, StaffId, SuccessResponse, UpdateCourseInput,
};

use super::service::CourseService;
use super::{ASSIGN_INSTRUCTOR, CREATE_COURSE, DELETE_COURSE, REMOVE_INSTRUCTOR, UPDATE_COURSE};
use crate::dashboard::Dashboard;

pub struct CourseQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> CourseQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: &CourseListParams,
    ) -> Result<Arc<PaginatedResponse<Course>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::courses::list(&params), move |api| {
                let params = params.clone();
                async move { CourseService::list_courses(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(course.id = %course_id))]
    pub async fn get(&self, course_id: &CourseId) -> Result<Arc<Course>, ApiError> {
        let id = course_id.clone();
        self.dashboard
            .query(keys::courses::detail(course_id), move |api| {
                let id = id.clone();
                async move { CourseService::get_course(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn by_code(&self, code: &str) -> Result<Arc<Course>, ApiError> {
        let code_owned = code.to_string();
        self.dashboard
            .query(keys::courses::by_code(code), move |api| {
                let code = code_owned.clone();
                async move { CourseService::get_course_by_code(&api, &code).await }
            })
            .await
    }

    #[instrument(skip(self), fields(course.id = %course_id, session.id = %session_id))]
    pub async fn registered_students(
        &self,
        course_id: &CourseId,
        session_id: &SessionId,
    ) -> Result<Arc<PaginatedResponse<RegisteredStudent>>, ApiError> {
        let (course, session) = (course_id.clone(), session_id.clone());
        self.dashboard
            .query(keys::courses::students(course_id, session_id), move |api| {
                let (course, session) = (course.clone(), session.clone());
                async move { CourseService::registered_students(&api, &course, &session).await }
            })
            .await
    }

    pub async fn create(&self, input: &CreateCourseInput) -> Result<Course, ApiError> {
        self.dashboard
            .mutate(
                CREATE_COURSE,
                input,
                CourseService::create_course(self.dashboard.api(), input),
                |_| vec![keys::courses::lists()],
            )
            .await
    }

    pub async fn update(
        &self,
        course_id: &CourseId,
        input: &UpdateCourseInput,
    ) -> Result<Course, ApiError> {
        let previous = self.cached_instructors(course_id);
        self.dashboard
            .mutate(
                UPDATE_COURSE,
                input,
                CourseService::update_course(self.dashboard.api(), course_id, input),
                |course| {
                    let mut stale = course_keys(course_id);
                    let current: Vec<StaffId> = course.instructor_ids().cloned().collect();
                    stale.extend(instructor_keys(previous.iter().chain(&current)));
                    stale
                },
            )
            .await
    }

    pub async fn delete(&self, course_id: &CourseId) -> Result<SuccessResponse, ApiError> {
        let instructors = self.cached_instructors(course_id);
        self.dashboard
            .execute(
                DELETE_COURSE,
                CourseService::delete_course(self.dashboard.api(), course_id),
                |_| {
                    let mut stale = course_keys(course_id);
                    stale.extend(instructor_keys(&instructors));
                    stale
                },
            )
            .await
    }

    pub async fn assign_instructor(
        &self,
        course_id: &CourseId,
        input: &AssignInstructorInput,
    ) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .mutate(
                ASSIGN_INSTRUCTOR,
                input,
                CourseService::assign_instructor(self.dashboard.api(), course_id, input),
                |_| {
                    let mut stale = course_keys(course_id);
                    stale.push(keys::staff::courses(&input.instructor_id));
                    stale
                },
            )
            .await
    }

    pub async fn remove_instructor(
        &self,
        course_id: &CourseId,
        instructor_id: &StaffId,
    ) -> Result<SuccessResponse, ApiError> {
        self.dashboard
            .execute(
                REMOVE_INSTRUCTOR,
                CourseService::remove_instructor(self.dashboard.api(), course_id, instructor_id),
                |_| {
                    let mut stale = course_keys(course_id);
                    stale.push(keys::staff::courses(instructor_id));
                    stale
                },
            )
            .await
    }

    /// Instructors of the cached copy of a course, if any.
    fn cached_instructors(&self, course_id: &CourseId) -> Vec<StaffId> {
        self.dashboard
            .cache()
            .get_query_data::<Course>(&keys::courses::detail(course_id))
            .map(|course| course.instructor_ids().cloned().collect())
            .unwrap_or_default()
    }
}

fn course_keys(course_id: &CourseId) -> Vec<QueryKey> {
    vec![
        keys::courses::lists(),
        keys::courses::detail(course_id),
        keys::courses::by_codes(),
    ]
}

fn instructor_keys<'s>(instructors: impl IntoIterator<Item = &'s StaffId>) -> Vec<QueryKey> {
    instructors.into_iter().map(keys::staff::courses).collect()
}
