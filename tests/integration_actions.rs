mod common;

use common::{department_json, faculty_json, setup_actions, success};
use httpmock::MockServer;
use serde_json::json;

use unirecords::ActionResult;
use unirecords::routes;
use unirecords::unirecords_models::{
    BulkPromoteInput, CreateFacultyInput, DepartmentId, StudentId, UpdateDepartmentInput,
};

#[tokio::test]
async fn test_create_faculty_action_revalidates_list_page() {
    let server = MockServer::start_async().await;
    let (actions, revalidator) = setup_actions(&server);

    server
        .mock_async(|when, then| {
            when.method("POST").path("/admin/faculties");
            then.status(201)
                .json_body(faculty_json("fac_1", "Faculty of Science", "FOS"));
        })
        .await;

    let result = actions
        .create_faculty(&CreateFacultyInput::new("Faculty of Science", "FOS"))
        .await;

    assert!(result.is_success());
    assert_eq!(result.data().map(|f| f.code.as_str()), Some("FOS"));
    assert_eq!(revalidator.take_stale(), vec![routes::FACULTIES.to_string()]);

    let body = serde_json::to_value(&result).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["code"], json!("FOS"));
}

#[tokio::test]
async fn test_failed_action_returns_message_and_revalidates_nothing() {
    let server = MockServer::start_async().await;
    let (actions, revalidator) = setup_actions(&server);

    server
        .mock_async(|when, then| {
            when.method("DELETE").path("/admin/departments/dep_1");
            then.status(409)
                .json_body(json!({ "message": "Department has active students" }));
        })
        .await;

    let result = actions.delete_department(&DepartmentId::new("dep_1")).await;

    assert_eq!(
        result,
        ActionResult::Failure {
            error: "Department has active students".to_string(),
            errors: None,
        }
    );
    assert!(revalidator.stale_paths().is_empty());
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "success": false, "error": "Department has active students" })
    );
}

#[tokio::test]
async fn test_update_department_revalidates_faculty_pages() {
    let server = MockServer::start_async().await;
    let (actions, revalidator) = setup_actions(&server);

    let mut moved = department_json("dep_1", "PHY", "fac_1");
    moved["faculty"] = faculty_json("fac_1", "Faculty of Science", "FOS");
    server
        .mock_async(|when, then| {
            when.method("PATCH")
                .path("/admin/departments/dep_1")
                .json_body(json!({ "name": "Applied Physics" }));
            then.status(200).json_body(moved);
        })
        .await;

    let input = UpdateDepartmentInput {
        name: Some("Applied Physics".to_string()),
        ..UpdateDepartmentInput::default()
    };
    let result = actions
        .update_department(&DepartmentId::new("dep_1"), &input)
        .await;

    assert!(result.is_success());
    assert!(revalidator.is_stale(routes::DEPARTMENTS));
    assert!(revalidator.is_stale(&routes::department("PHY")));
    assert!(revalidator.is_stale(&routes::faculty("FOS")));
    assert!(revalidator.is_stale(&routes::faculty_departments("FOS")));
}

#[tokio::test]
async fn test_invalid_action_input_returns_field_errors() {
    let server = MockServer::start_async().await;
    let (actions, revalidator) = setup_actions(&server);

    let promote = server
        .mock_async(|when, then| {
            when.method("POST").path("/admin/students/bulk-promote");
            then.status(200).json_body(success());
        })
        .await;

    let input = BulkPromoteInput {
        student_ids: Vec::new(),
        new_level: 200,
    };
    let result = actions.bulk_promote_students(&input).await;

    assert!(!result.is_success());
    assert!(result.field_errors().unwrap().contains_key("student_ids"));
    promote.assert_calls_async(0).await;
    assert!(revalidator.stale_paths().is_empty());
}

#[tokio::test]
async fn test_promote_action_revalidates_student_page() {
    let server = MockServer::start_async().await;
    let (actions, revalidator) = setup_actions(&server);

    let promote = server
        .mock_async(|when, then| {
            when.method("PATCH").path("/admin/students/stu_1/promote/300");
            then.status(200).json_body(success());
        })
        .await;

    let result = actions.promote_student(&StudentId::new("stu_1"), 300).await;

    assert_eq!(result, ActionResult::done());
    promote.assert_async().await;
    assert_eq!(
        revalidator.take_stale(),
        vec![routes::STUDENTS.to_string(), routes::student("stu_1")]
    );
}

#[tokio::test]
async fn test_empty_upload_is_rejected_locally() {
    let server = MockServer::start_async().await;
    let (actions, _revalidator) = setup_actions(&server);

    let upload = server
        .mock_async(|when, then| {
            when.method("POST").path("/admin/staff/bulk-upload");
            then.status(200).json_body(json!({
                "success": true, "totalProcessed": 0, "successCount": 0, "failureCount": 0
            }));
        })
        .await;

    let result = actions.bulk_upload_staff("staff.csv", Vec::new()).await;

    assert_eq!(result.error(), Some("No file provided"));
    upload.assert_calls_async(0).await;
}
