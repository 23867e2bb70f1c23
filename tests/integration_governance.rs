mod common;

use common::{
    department_json, department_with_hod, faculty_json, page, setup_dashboard, success,
};
use httpmock::MockServer;
use serde_json::json;

use unirecords::unirecords_cache::keys;
use unirecords::unirecords_core::ApiError;
use unirecords::unirecords_models::{
    CreateDepartmentInput, CreateFacultyInput, DepartmentId, DepartmentListParams, FacultyId,
    FacultyListParams, UserId,
};

#[tokio::test]
async fn test_create_faculty_refreshes_faculty_list() {
    let server = MockServer::start_async().await;
    let (dashboard, notifier) = setup_dashboard(&server);
    let governance = dashboard.governance();
    let params = FacultyListParams::default();

    let list = server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/faculties");
            then.status(200)
                .json_body(page(vec![faculty_json("fac_0", "Faculty of Arts", "FOA")]));
        })
        .await;

    let before = governance.faculties(&params).await.unwrap();
    assert_eq!(before.data.len(), 1);

    // Served from cache until something invalidates it.
    governance.faculties(&params).await.unwrap();
    list.assert_calls_async(1).await;

    let create = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/admin/faculties")
                .header("authorization", "Bearer test-token")
                .json_body(json!({ "name": "Faculty of Science", "code": "FOS" }));
            then.status(201)
                .json_body(faculty_json("fac_1", "Faculty of Science", "FOS"));
        })
        .await;

    let created = governance
        .create_faculty(&CreateFacultyInput::new("Faculty of Science", "FOS"))
        .await
        .unwrap();
    assert_eq!(created.id, FacultyId::new("fac_1"));
    create.assert_async().await;

    assert_eq!(
        dashboard.cache().is_invalidated(&keys::faculties::list(&params)),
        Some(true)
    );
    assert_eq!(
        notifier.last().map(|n| n.message),
        Some("Faculty created successfully".to_string())
    );

    list.delete_async().await;
    let refreshed = server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/faculties");
            then.status(200).json_body(page(vec![
                faculty_json("fac_0", "Faculty of Arts", "FOA"),
                faculty_json("fac_1", "Faculty of Science", "FOS"),
            ]));
        })
        .await;

    let after = governance.faculties(&params).await.unwrap();
    refreshed.assert_calls_async(1).await;
    assert!(after.data.iter().any(|f| f.code == "FOS"));
}

#[tokio::test]
async fn test_invalid_faculty_input_never_reaches_backend() {
    let server = MockServer::start_async().await;
    let (dashboard, notifier) = setup_dashboard(&server);

    let create = server
        .mock_async(|when, then| {
            when.method("POST").path("/admin/faculties");
            then.status(201).json_body(faculty_json("fac_1", "x", "x"));
        })
        .await;

    let err = dashboard
        .governance()
        .create_faculty(&CreateFacultyInput::new("", "FOS"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(err.field_errors().unwrap().contains_key("name"));
    create.assert_calls_async(0).await;
    assert!(notifier.last().unwrap().is_error());
}

#[tokio::test]
async fn test_delete_department_refreshes_owning_faculty() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);
    let governance = dashboard.governance();
    let params = DepartmentListParams::for_faculty(FacultyId::new("fac_1"));

    server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/admin/departments")
                .query_param("facultyId", "fac_1");
            then.status(200)
                .json_body(page(vec![department_json("dep_1", "PHY", "fac_1")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/faculties/fac_1");
            then.status(200)
                .json_body(faculty_json("fac_1", "Faculty of Science", "FOS"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/faculties/fac_2");
            then.status(200)
                .json_body(faculty_json("fac_2", "Faculty of Arts", "FOA"));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method("DELETE").path("/admin/departments/dep_1");
            then.status(200).json_body(success());
        })
        .await;

    governance.departments(&params).await.unwrap();
    governance.faculty(&FacultyId::new("fac_1")).await.unwrap();
    governance.faculty(&FacultyId::new("fac_2")).await.unwrap();

    governance
        .delete_department(&DepartmentId::new("dep_1"))
        .await
        .unwrap();
    delete.assert_async().await;

    let cache = dashboard.cache();
    assert_eq!(cache.is_invalidated(&keys::departments::list(&params)), Some(true));
    assert_eq!(
        cache.is_invalidated(&keys::faculties::detail(&FacultyId::new("fac_1"))),
        Some(true)
    );
    assert_eq!(
        cache.is_invalidated(&keys::faculties::detail(&FacultyId::new("fac_2"))),
        Some(false)
    );
}

#[tokio::test]
async fn test_failed_delete_keeps_cache_and_reports_backend_message() {
    let server = MockServer::start_async().await;
    let (dashboard, notifier) = setup_dashboard(&server);
    let governance = dashboard.governance();
    let params = DepartmentListParams::default();

    let list = server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/departments");
            then.status(200)
                .json_body(page(vec![department_json("dep_1", "PHY", "fac_1")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("DELETE").path("/admin/departments/dep_1");
            then.status(409)
                .json_body(json!({ "message": "Department has active students" }));
        })
        .await;

    governance.departments(&params).await.unwrap();

    let err = governance
        .delete_department(&DepartmentId::new("dep_1"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Request {
            status: 409,
            message: "Department has active students".to_string()
        }
    );
    assert_eq!(
        dashboard.cache().is_invalidated(&keys::departments::list(&params)),
        Some(false)
    );

    let last = notifier.last().unwrap();
    assert!(last.is_error());
    assert_eq!(last.message, "Department has active students");

    // Still served from cache.
    governance.departments(&params).await.unwrap();
    list.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_assign_hod_refetches_department() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);
    let governance = dashboard.governance();
    let department_id = DepartmentId::new("dep_1");

    let detail = server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/departments/dep_1");
            then.status(200)
                .json_body(department_json("dep_1", "PHY", "fac_1"));
        })
        .await;
    let stats = server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/departments/stats");
            then.status(200)
                .json_body(json!({ "total": 1, "withHod": 0, "withoutHod": 1 }));
        })
        .await;
    let assign = server
        .mock_async(|when, then| {
            when.method("PATCH")
                .path("/admin/departments/dep_1/hod/staff_9");
            then.status(200).json_body(success());
        })
        .await;

    let before = governance.department(&department_id).await.unwrap();
    assert!(!before.has_hod());
    governance.department_stats().await.unwrap();

    governance
        .assign_hod(&department_id, &UserId::new("staff_9"))
        .await
        .unwrap();
    assign.assert_async().await;

    let cache = dashboard.cache();
    assert_eq!(
        cache.is_invalidated(&keys::departments::detail(&department_id)),
        Some(true)
    );
    assert_eq!(cache.is_invalidated(&keys::departments::stats()), Some(true));

    detail.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/departments/dep_1");
            then.status(200)
                .json_body(department_with_hod("dep_1", "PHY", "fac_1", "staff_9"));
        })
        .await;

    let after = governance.department(&department_id).await.unwrap();
    assert_eq!(
        after.hod.as_ref().and_then(|h| h.id.clone()),
        Some(UserId::new("staff_9"))
    );
    stats.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_create_department_refreshes_faculty_by_code() {
    let server = MockServer::start_async().await;
    let (dashboard, _notifier) = setup_dashboard(&server);
    let governance = dashboard.governance();

    server
        .mock_async(|when, then| {
            when.method("GET").path("/admin/faculties/by-code/FOS");
            then.status(200)
                .json_body(faculty_json("fac_1", "Faculty of Science", "FOS"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method("POST").path("/admin/departments");
            then.status(201)
                .json_body(department_json("dep_2", "CHM", "fac_1"));
        })
        .await;

    governance.faculty_by_code("FOS").await.unwrap();

    let input = CreateDepartmentInput::new("Chemistry", "CHM", FacultyId::new("fac_1"));
    governance.create_department(&input).await.unwrap();

    assert_eq!(
        dashboard.cache().is_invalidated(&keys::faculties::by_code("FOS")),
        Some(true)
    );
}
