use std::sync::Arc;

use tracing::{debug, instrument};

use unirecords_cache::{QueryKey, keys};
use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    CreateDepartmentInput, CreateFacultyInput, CreateGradeScaleInput, Department, DepartmentId,
    DepartmentListParams, DepartmentStats, Faculty, FacultyId, FacultyListParams, GradeScale,
    SuccessResponse, UpdateDepartmentInput, UpdateFacultyInput, UserId,
};

use super::service::GovernanceService;
use super::{
    ADD_GRADE_SCALE, ASSIGN_DEAN, ASSIGN_HOD, CREATE_DEPARTMENT, CREATE_FACULTY, DELETE_DEPARTMENT,
    DELETE_FACULTY, UPDATE_DEPARTMENT, UPDATE_FACULTY,
};
use crate::dashboard::Dashboard;

/// Faculty and department queries and mutations.
pub struct GovernanceQueries<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> GovernanceQueries<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    #[instrument(skip(self))]
    pub async fn faculties(
        &self,
        params: &FacultyListParams,
    ) -> Result<Arc<PaginatedResponse<Faculty>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::faculties::list(&params), move |api| {
                let params = params.clone();
                async move { GovernanceService::list_faculties(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(faculty.id = %faculty_id))]
    pub async fn faculty(&self, faculty_id: &FacultyId) -> Result<Arc<Faculty>, ApiError> {
        let id = faculty_id.clone();
        self.dashboard
            .query(keys::faculties::detail(faculty_id), move |api| {
                let id = id.clone();
                async move { GovernanceService::get_faculty(&api, &id).await }
            })
            .await
    }

    /// Faculty detail pages are addressed by code.
    #[instrument(skip(self))]
    pub async fn faculty_by_code(&self, code: &str) -> Result<Arc<Faculty>, ApiError> {
        let code_owned = code.to_string();
        self.dashboard
            .query(keys::faculties::by_code(code), move |api| {
                let code = code_owned.clone();
                async move { GovernanceService::get_faculty_by_code(&api, &code).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn departments(
        &self,
        params: &DepartmentListParams,
    ) -> Result<Arc<PaginatedResponse<Department>>, ApiError> {
        let params = params.clone();
        self.dashboard
            .query(keys::departments::list(&params), move |api| {
                let params = params.clone();
                async move { GovernanceService::list_departments(&api, &params).await }
            })
            .await
    }

    #[instrument(skip(self), fields(department.id = %department_id))]
    pub async fn department(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Arc<Department>, ApiError> {
        let id = department_id.clone();
        self.dashboard
            .query(keys::departments::detail(department_id), move |api| {
                let id = id.clone();
                async move { GovernanceService::get_department(&api, &id).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn department_by_code(&self, code: &str) -> Result<Arc<Department>, ApiError> {
        let code_owned = code.to_string();
        self.dashboard
            .query(keys::departments::by_code(code), move |api| {
                let code = code_owned.clone();
                async move { GovernanceService::get_department_by_code(&api, &code).await }
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn department_stats(&self) -> Result<Arc<DepartmentStats>, ApiError> {
        self.dashboard
            .query(keys::departments::stats(), |api| async move {
                GovernanceService::department_stats(&api).await
            })
            .await
    }

    pub async fn create_faculty(&self, input: &CreateFacultyInput) -> Result<Faculty, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .mutate(
                CREATE_FACULTY,
                input,
                GovernanceService::create_faculty(api, input),
                |_| vec![keys::faculties::lists()],
            )
            .await
    }

    pub async fn update_faculty(
        &self,
        faculty_id: &FacultyId,
        input: &UpdateFacultyInput,
    ) -> Result<Faculty, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .mutate(
                UPDATE_FACULTY,
                input,
                GovernanceService::update_faculty(api, faculty_id, input),
                |_| faculty_keys(faculty_id),
            )
            .await
    }

    /// Deleting a faculty takes its departments with it on the backend.
    pub async fn delete_faculty(&self, faculty_id: &FacultyId) -> Result<SuccessResponse, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .execute(
                DELETE_FACULTY,
                GovernanceService::delete_faculty(api, faculty_id),
                |_| vec![keys::faculties::all(), keys::departments::lists()],
            )
            .await
    }

    pub async fn assign_dean(
        &self,
        faculty_id: &FacultyId,
        dean_id: &UserId,
    ) -> Result<SuccessResponse, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .execute(
                ASSIGN_DEAN,
                GovernanceService::assign_dean(api, faculty_id, dean_id),
                |_| faculty_keys(faculty_id),
            )
            .await
    }

    pub async fn create_department(
        &self,
        input: &CreateDepartmentInput,
    ) -> Result<Department, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .mutate(
                CREATE_DEPARTMENT,
                input,
                GovernanceService::create_department(api, input),
                |_| {
                    let mut stale = vec![keys::departments::lists(), keys::departments::stats()];
                    stale.extend(owning_faculty_keys(&input.faculty_id));
                    stale
                },
            )
            .await
    }

    /// Also refreshes the owning faculty, and the previous one when the
    /// department moved.
    pub async fn update_department(
        &self,
        department_id: &DepartmentId,
        input: &UpdateDepartmentInput,
    ) -> Result<Department, ApiError> {
        let api = self.dashboard.api();
        let previous_faculty = self.known_faculty_of(department_id);
        self.dashboard
            .mutate(
                UPDATE_DEPARTMENT,
                input,
                GovernanceService::update_department(api, department_id, input),
                |updated| {
                    let mut stale = department_keys(department_id);
                    stale.push(keys::departments::lists());
                    stale.extend(owning_faculty_keys(&updated.faculty_id));
                    if let Some(previous) = previous_faculty.filter(|p| *p != updated.faculty_id) {
                        stale.push(keys::faculties::detail(&previous));
                    }
                    stale
                },
            )
            .await
    }

    /// The owning faculty is refreshed when it can be found in the cache.
    pub async fn delete_department(
        &self,
        department_id: &DepartmentId,
    ) -> Result<SuccessResponse, ApiError> {
        let api = self.dashboard.api();
        let faculty_id = self.known_faculty_of(department_id);
        self.dashboard
            .execute(
                DELETE_DEPARTMENT,
                GovernanceService::delete_department(api, department_id),
                |_| {
                    let mut stale = department_keys(department_id);
                    stale.push(keys::departments::lists());
                    stale.push(keys::departments::stats());
                    if let Some(faculty_id) = &faculty_id {
                        stale.extend(owning_faculty_keys(faculty_id));
                    }
                    stale
                },
            )
            .await
    }

    pub async fn assign_hod(
        &self,
        department_id: &DepartmentId,
        hod_id: &UserId,
    ) -> Result<SuccessResponse, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .execute(
                ASSIGN_HOD,
                GovernanceService::assign_hod(api, department_id, hod_id),
                |_| {
                    vec![
                        keys::departments::detail(department_id),
                        keys::departments::all(),
                    ]
                },
            )
            .await
    }

    pub async fn add_grade_scale(
        &self,
        department_id: &DepartmentId,
        input: &CreateGradeScaleInput,
    ) -> Result<GradeScale, ApiError> {
        let api = self.dashboard.api();
        self.dashboard
            .mutate(
                ADD_GRADE_SCALE,
                input,
                GovernanceService::add_grade_scale(api, department_id, input),
                |_| department_keys(department_id),
            )
            .await
    }

    /// Faculty of a department, from whatever cached copy of it exists.
    fn known_faculty_of(&self, department_id: &DepartmentId) -> Option<FacultyId> {
        let cache = self.dashboard.cache();

        let detail = keys::departments::detail(department_id);
        if let Some(department) = cache.get_query_data::<Department>(&detail) {
            return Some(department.faculty_id.clone());
        }

        let candidates = cache
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&keys::departments::all()));

        for key in candidates {
            let found = if key.starts_with(&keys::departments::lists()) {
                cache
                    .get_query_data::<PaginatedResponse<Department>>(&key)
                    .and_then(|page| {
                        page.data
                            .iter()
                            .find(|d| d.id == *department_id)
                            .map(|d| d.faculty_id.clone())
                    })
            } else {
                cache
                    .get_query_data::<Department>(&key)
                    .filter(|d| d.id == *department_id)
                    .map(|d| d.faculty_id.clone())
            };

            if found.is_some() {
                debug!(cache.key = %key, "Found owning faculty in cached department data");
                return found;
            }
        }

        None
    }
}

/// Detail, by-code lookups and lists of one faculty.
fn faculty_keys(faculty_id: &FacultyId) -> Vec<QueryKey> {
    vec![
        keys::faculties::detail(faculty_id),
        keys::faculties::by_codes(),
        keys::faculties::lists(),
    ]
}

/// Views of a faculty that embed its departments.
fn owning_faculty_keys(faculty_id: &FacultyId) -> Vec<QueryKey> {
    vec![
        keys::faculties::detail(faculty_id),
        keys::faculties::by_codes(),
    ]
}

fn department_keys(department_id: &DepartmentId) -> Vec<QueryKey> {
    vec![
        keys::departments::detail(department_id),
        keys::departments::by_codes(),
    ]
}
