use unirecords_models::{
    CreateDepartmentInput, CreateFacultyInput, CreateGradeScaleInput, Department, DepartmentId,
    Faculty, FacultyId, GradeScale, UpdateDepartmentInput, UpdateFacultyInput, UserId,
};

use super::service::GovernanceService;
use super::{
    ADD_GRADE_SCALE, ASSIGN_DEAN, ASSIGN_HOD, CREATE_DEPARTMENT, CREATE_FACULTY, DELETE_DEPARTMENT,
    DELETE_FACULTY, UPDATE_DEPARTMENT, UPDATE_FACULTY,
};
use crate::actions::{ActionResult, Actions, acknowledged};
use crate::routes;

impl Actions {
    pub async fn create_faculty(&self, input: &CreateFacultyInput) -> ActionResult<Faculty> {
        self.run(
            CREATE_FACULTY,
            input,
            GovernanceService::create_faculty(self.api(), input),
            |_| vec![routes::FACULTIES.to_string()],
        )
        .await
    }

    pub async fn update_faculty(
        &self,
        faculty_id: &FacultyId,
        input: &UpdateFacultyInput,
    ) -> ActionResult<Faculty> {
        self.run(
            UPDATE_FACULTY,
            input,
            GovernanceService::update_faculty(self.api(), faculty_id, input),
            |faculty| vec![routes::FACULTIES.to_string(), routes::faculty(&faculty.code)],
        )
        .await
    }

    pub async fn delete_faculty(&self, faculty_id: &FacultyId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_FACULTY,
                GovernanceService::delete_faculty(self.api(), faculty_id),
                |_| {
                    vec![
                        routes::FACULTIES.to_string(),
                        routes::DEPARTMENTS.to_string(),
                    ]
                },
            )
            .await;
        acknowledged(result)
    }

    pub async fn assign_dean(&self, faculty_id: &FacultyId, dean_id: &UserId) -> ActionResult<()> {
        let result = self
            .perform(
                ASSIGN_DEAN,
                GovernanceService::assign_dean(self.api(), faculty_id, dean_id),
                |_| vec![routes::FACULTIES.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn create_department(&self, input: &CreateDepartmentInput) -> ActionResult<Department> {
        self.run(
            CREATE_DEPARTMENT,
            input,
            GovernanceService::create_department(self.api(), input),
            |department| {
                let mut paths = vec![
                    routes::DEPARTMENTS.to_string(),
                    routes::FACULTIES.to_string(),
                ];
                paths.extend(faculty_pages(department));
                paths
            },
        )
        .await
    }

    pub async fn update_department(
        &self,
        department_id: &DepartmentId,
        input: &UpdateDepartmentInput,
    ) -> ActionResult<Department> {
        self.run(
            UPDATE_DEPARTMENT,
            input,
            GovernanceService::update_department(self.api(), department_id, input),
            |department| {
                let mut paths = vec![
                    routes::DEPARTMENTS.to_string(),
                    routes::department(&department.code),
                ];
                paths.extend(faculty_pages(department));
                paths
            },
        )
        .await
    }

    pub async fn delete_department(&self, department_id: &DepartmentId) -> ActionResult<()> {
        let result = self
            .perform(
                DELETE_DEPARTMENT,
                GovernanceService::delete_department(self.api(), department_id),
                |_| {
                    vec![
                        routes::DEPARTMENTS.to_string(),
                        routes::FACULTIES.to_string(),
                    ]
                },
            )
            .await;
        acknowledged(result)
    }

    pub async fn assign_hod(&self, department_id: &DepartmentId, hod_id: &UserId) -> ActionResult<()> {
        let result = self
            .perform(
                ASSIGN_HOD,
                GovernanceService::assign_hod(self.api(), department_id, hod_id),
                |_| vec![routes::DEPARTMENTS.to_string()],
            )
            .await;
        acknowledged(result)
    }

    pub async fn add_grade_scale(
        &self,
        department_id: &DepartmentId,
        input: &CreateGradeScaleInput,
    ) -> ActionResult<GradeScale> {
        self.run(
            ADD_GRADE_SCALE,
            input,
            GovernanceService::add_grade_scale(self.api(), department_id, input),
            |_| vec![routes::DEPARTMENTS.to_string()],
        )
        .await
    }
}

/// Pages of the owning faculty, when the backend embedded it.
fn faculty_pages(department: &Department) -> Vec<String> {
    department
        .faculty
        .as_ref()
        .map(|faculty| {
            vec![
                routes::faculty(&faculty.code),
                routes::faculty_departments(&faculty.code),
            ]
        })
        .unwrap_or_default()
}
