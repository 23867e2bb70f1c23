//! Dashboard page paths that server actions mark for regeneration.

pub const DASHBOARD: &str = "/dashboard";
pub const FACULTIES: &str = "/dashboard/governance/faculties";
pub const DEPARTMENTS: &str = "/dashboard/governance/departments";
pub const COURSES: &str = "/dashboard/courses";
pub const STAFF: &str = "/dashboard/staffs";
pub const STUDENTS: &str = "/dashboard/students";
pub const RESULTS: &str = "/dashboard/results";
pub const SESSIONS: &str = "/dashboard/sessions";
pub const ADMIN_USERS: &str = "/dashboard/admin/users";

pub fn faculty(code: &str) -> String {
    format!("{FACULTIES}/{code}")
}

/// Department list nested under one faculty.
pub fn faculty_departments(code: &str) -> String {
    format!("{FACULTIES}/{code}/departments")
}

pub fn department(code: &str) -> String {
    format!("{DEPARTMENTS}/{code}")
}

pub fn staff_member(id: &str) -> String {
    format!("{STAFF}/{id}")
}

pub fn student(id: &str) -> String {
    format!("{STUDENTS}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths() {
        assert_eq!(faculty("FOS"), "/dashboard/governance/faculties/FOS");
        assert_eq!(
            faculty_departments("FOS"),
            "/dashboard/governance/faculties/FOS/departments"
        );
        assert_eq!(department("CSC"), "/dashboard/governance/departments/CSC");
        assert_eq!(staff_member("staff_9"), "/dashboard/staffs/staff_9");
        assert_eq!(student("stu_1"), "/dashboard/students/stu_1");
    }
}
