use tracing::instrument;

use unirecords_core::{ApiError, PaginatedResponse};
use unirecords_models::{
    CreateDepartmentInput, CreateFacultyInput, CreateGradeScaleInput, Department, DepartmentId,
    DepartmentListParams, DepartmentStats, Faculty, FacultyId, FacultyListParams, GradeScale,
    SuccessResponse, UpdateDepartmentInput, UpdateFacultyInput, UserId,
};

use crate::api::{ApiClient, Endpoint};

const FACULTIES: &str = "/admin/faculties";
const DEPARTMENTS: &str = "/admin/departments";

pub struct GovernanceService;

impl GovernanceService {
    #[instrument(skip(api))]
    pub async fn list_faculties(
        api: &ApiClient,
        params: &FacultyListParams,
    ) -> Result<PaginatedResponse<Faculty>, ApiError> {
        api.get_with(FACULTIES, params).await
    }

    #[instrument(skip(api), fields(faculty.id = %faculty_id))]
    pub async fn get_faculty(api: &ApiClient, faculty_id: &FacultyId) -> Result<Faculty, ApiError> {
        api.get(Endpoint::new(FACULTIES).push(faculty_id)).await
    }

    #[instrument(skip(api))]
    pub async fn get_faculty_by_code(api: &ApiClient, code: &str) -> Result<Faculty, ApiError> {
        api.get(Endpoint::new(FACULTIES).push("by-code").push(code)).await
    }

    #[instrument(skip(api, input), fields(faculty.code = %input.code))]
    pub async fn create_faculty(
        api: &ApiClient,
        input: &CreateFacultyInput,
    ) -> Result<Faculty, ApiError> {
        api.post(FACULTIES, input).await
    }

    #[instrument(skip(api, input), fields(faculty.id = %faculty_id))]
    pub async fn update_faculty(
        api: &ApiClient,
        faculty_id: &FacultyId,
        input: &UpdateFacultyInput,
    ) -> Result<Faculty, ApiError> {
        api.patch(Endpoint::new(FACULTIES).push(faculty_id), input).await
    }

    #[instrument(skip(api), fields(faculty.id = %faculty_id))]
    pub async fn delete_faculty(
        api: &ApiClient,
        faculty_id: &FacultyId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(FACULTIES).push(faculty_id)).await
    }

    #[instrument(skip(api), fields(faculty.id = %faculty_id, dean.id = %dean_id))]
    pub async fn assign_dean(
        api: &ApiClient,
        faculty_id: &FacultyId,
        dean_id: &UserId,
    ) -> Result<SuccessResponse, ApiError> {
        api.patch_empty(Endpoint::new(FACULTIES).push(faculty_id).push("dean").push(dean_id))
            .await
    }

    #[instrument(skip(api))]
    pub async fn list_departments(
        api: &ApiClient,
        params: &DepartmentListParams,
    ) -> Result<PaginatedResponse<Department>, ApiError> {
        api.get_with(DEPARTMENTS, params).await
    }

    #[instrument(skip(api), fields(department.id = %department_id))]
    pub async fn get_department(
        api: &ApiClient,
        department_id: &DepartmentId,
    ) -> Result<Department, ApiError> {
        api.get(Endpoint::new(DEPARTMENTS).push(department_id)).await
    }

    #[instrument(skip(api))]
    pub async fn get_department_by_code(
        api: &ApiClient,
        code: &str,
    ) -> Result<Department, ApiError> {
        api.get(Endpoint::new(DEPARTMENTS).push("by-code").push(code)).await
    }

    #[instrument(skip(api, input), fields(department.code = %input.code, faculty.id = %input.faculty_id))]
    pub async fn create_department(
        api: &ApiClient,
        input: &CreateDepartmentInput,
    ) -> Result<Department, ApiError> {
        api.post(DEPARTMENTS, input).await
    }

    #[instrument(skip(api, input), fields(department.id = %department_id))]
    pub async fn update_department(
        api: &ApiClient,
        department_id: &DepartmentId,
        input: &UpdateDepartmentInput,
    ) -> Result<Department, ApiError> {
        api.patch(Endpoint::new(DEPARTMENTS).push(department_id), input)
            .await
    }

    #[instrument(skip(api), fields(department.id = %department_id))]
    pub async fn delete_department(
        api: &ApiClient,
        department_id: &DepartmentId,
    ) -> Result<SuccessResponse, ApiError> {
        api.delete(Endpoint::new(DEPARTMENTS).push(department_id)).await
    }

    #[instrument(skip(api), fields(department.id = %department_id, hod.id = %hod_id))]
    pub async fn assign_hod(
        api: &ApiClient,
        department_id: &DepartmentId,
        hod_id: &UserId,
    ) -> Result<SuccessResponse, ApiError> {
        api.patch_empty(Endpoint::new(DEPARTMENTS).push(department_id).push("hod").push(hod_id))
            .await
    }

    #[instrument(skip(api))]
    pub async fn department_stats(api: &ApiClient) -> Result<DepartmentStats, ApiError> {
        api.get(Endpoint::new(DEPARTMENTS).push("stats")).await
    }

    #[instrument(skip(api, input), fields(department.id = %department_id, grade = %input.grade))]
    pub async fn add_grade_scale(
        api: &ApiClient,
        department_id: &DepartmentId,
        input: &CreateGradeScaleInput,
    ) -> Result<GradeScale, ApiError> {
        api.post(Endpoint::new(DEPARTMENTS).push(department_id).push("grade-scales"), input)
            .await
    }
}
