mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{client_config, page, setup_dashboard, setup_dashboard_with, student_json};
use httpmock::MockServer;
use serde_json::json;

use unirecords::unirecords_cache::QueryClient;
use unirecords::unirecords_config::{Credentials, QueryCacheConfig};
use unirecords::unirecords_core::ApiError;
use unirecords::unirecords_models::{
    CreateStudentInput, DepartmentId, ExportFormat, StudentId, StudentListParams, UserId,
};
use unirecords::{ApiClient, Dashboard, RecordingNotifier};

fn dashboard_for(api: ApiClient) -> Dashboard {
    Dashboard::new(
        api,
        QueryClient::new(QueryCacheConfig::default()),
        Arc::new(RecordingNotifier::new()),
    )
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);

    let get = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/students/stu_1")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(student_json("stu_1", "SCI/21/001", 200));
        })
        .await;

    let student = dashboard.students().get(&StudentId::new("stu_1")).await.unwrap();
    assert_eq!(student.matric_number, "SCI/21/001");
    get.assert_async().await;
}

#[tokio::test]
async fn test_matric_number_is_sent_as_one_path_segment() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);

    let encoded = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/students/matric/CSC%2F2023%2F001");
            then.status(200).json_body(student_json("stu_7", "CSC/2023/001", 100));
        })
        .await;
    let split = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/students/matric/CSC/2023/001");
            then.status(404).json_body(json!({ "message": "Route not found" }));
        })
        .await;

    let student = dashboard.students().by_matric("CSC/2023/001").await.unwrap();

    assert_eq!(student.id, StudentId::new("stu_7"));
    encoded.assert_calls_async(1).await;
    split.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_session_cookie_is_forwarded() {
    let server = MockServer::start_async().await;
    let config =
        client_config(&server).with_credentials(Credentials::Cookie("session=abc".to_string()));
    let dashboard = dashboard_for(ApiClient::new(&config).unwrap());

    let get = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/students/stu_1")
                .header("cookie", "session=abc");
            then.status(200).json_body(student_json("stu_1", "SCI/21/001", 200));
        })
        .await;

    dashboard.students().get(&StudentId::new("stu_1")).await.unwrap();
    get.assert_async().await;
}

#[tokio::test]
async fn test_list_filters_become_query_params() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);

    let list = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/students")
                .query_param("departmentId", "dep_1")
                .query_param("level", "200")
                .query_param("status", "ACTIVE")
                .query_param("search", "ada");
            then.status(200)
                .json_body(page(vec![student_json("stu_1", "SCI/21/001", 200)]));
        })
        .await;

    let params = StudentListParams::from_filters("dep_1", "200", "active", "ada");
    let students = dashboard.students().list(&params).await.unwrap();

    assert_eq!(students.meta.total, 1);
    list.assert_async().await;
}

#[tokio::test]
async fn test_all_sentinel_sends_no_filter() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);

    let list = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/students")
                .query_param_missing("departmentId")
                .query_param_missing("status");
            then.status(200).json_body(page(vec![]));
        })
        .await;

    let params = StudentListParams::from_filters("all", "", "all", "");
    let students = dashboard.students().list(&params).await.unwrap();

    assert!(students.is_empty());
    list.assert_async().await;
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start_async().await;
    let config = client_config(&server).with_timeout(Duration::from_millis(200));
    let dashboard = dashboard_for(ApiClient::new(&config).unwrap());

    server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/students/stu_1");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(student_json("stu_1", "SCI/21/001", 200));
        })
        .await;

    let err = dashboard
        .students()
        .get(&StudentId::new("stu_1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout { .. }), "got {err:?}");
    assert!(dashboard.cache().is_empty());
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);

    server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/students/stu_404");
            then.status(404).json_body(json!({ "message": "Student not found" }));
        })
        .await;

    let err = dashboard
        .students()
        .get(&StudentId::new("stu_404"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.user_message("fallback"), "Student not found");
}

#[tokio::test]
async fn test_backend_field_errors_are_preserved() {
    let server = MockServer::start_async().await;
    let (dashboard, notifier) = setup_dashboard(&server);

    server
        .mock_async(|when, then| {
            when.method("POST").path("/admin/students");
            then.status(422).json_body(json!({
                "message": "Validation failed",
                "errors": { "matricNumber": ["Matric number already exists"] }
            }));
        })
        .await;

    let input = CreateStudentInput {
        user_id: UserId::new("usr_1"),
        matric_number: "SCI/21/001".to_string(),
        department_id: DepartmentId::new("dep_1"),
        level: 100,
        admission_date: None,
    };
    let err = dashboard.students().create(&input).await.unwrap_err();

    assert_eq!(
        err.field_errors().and_then(|f| f.get("matricNumber")).cloned(),
        Some(vec!["Matric number already exists".to_string()])
    );
    assert_eq!(notifier.last().unwrap().message, "Validation failed");
}

#[tokio::test]
async fn test_export_returns_raw_bytes() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard_with(&server, QueryCacheConfig::default());

    let export = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/staff/export")
                .query_param("format", "csv");
            then.status(200)
                .header("content-type", "text/csv")
                .body("staffNumber,name\nSTF-001,Ada Lovelace\n");
        })
        .await;

    let bytes = dashboard.staff().export(ExportFormat::Csv).await.unwrap();

    assert!(bytes.starts_with(b"staffNumber,name"));
    export.assert_async().await;
    assert!(dashboard.cache().is_empty());
}
