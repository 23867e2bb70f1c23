#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use httpmock::MockServer;
use serde_json::{Value, json};

use unirecords::unirecords_cache::QueryClient;
use unirecords::unirecords_config::{ClientConfig, Credentials, QueryCacheConfig};
use unirecords::{Actions, ApiClient, Dashboard, PathRevalidator, RecordingNotifier};

/// Long enough that a cached read is only refetched after invalidation.
pub const LONG_STALE_TIME: Duration = Duration::from_secs(300);

pub const TEST_TOKEN: &str = "test-token";

pub fn client_config(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_url(server.base_url())
        .with_credentials(Credentials::Bearer(TEST_TOKEN.to_string()))
        .with_timeout(Duration::from_secs(5))
}

pub fn api_client(config: &ClientConfig) -> ApiClient {
    ApiClient::new(config).unwrap()
}

/// A dashboard against `server` whose notifications can be inspected.
pub fn setup_dashboard(server: &MockServer) -> (Dashboard, RecordingNotifier) {
    setup_dashboard_with(
        server,
        QueryCacheConfig::default().with_stale_time(LONG_STALE_TIME),
    )
}

pub fn setup_dashboard_with(
    server: &MockServer,
    cache: QueryCacheConfig,
) -> (Dashboard, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let dashboard = Dashboard::new(
        api_client(&client_config(server)),
        QueryClient::new(cache),
        Arc::new(notifier.clone()),
    );
    (dashboard, notifier)
}

pub fn setup_actions(server: &MockServer) -> (Actions, PathRevalidator) {
    let revalidator = PathRevalidator::new();
    let actions = Actions::new(
        api_client(&client_config(server)),
        Arc::new(revalidator.clone()),
    );
    (actions, revalidator)
}

/// `{ data, meta }` list envelope holding every item on one page.
pub fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "data": items,
        "meta": { "total": total, "page": 1, "limit": 10, "totalPages": 1 }
    })
}

pub fn faculty_json(id: &str, name: &str, code: &str) -> Value {
    json!({ "id": id, "name": name, "code": code, "departments": [] })
}

pub fn department_json(id: &str, code: &str, faculty_id: &str) -> Value {
    let name: String = CompanyName().fake();
    json!({ "id": id, "name": name, "code": code, "facultyId": faculty_id })
}

pub fn department_with_hod(id: &str, code: &str, faculty_id: &str, hod_id: &str) -> Value {
    let mut department = department_json(id, code, faculty_id);
    let hod_name: String = Name().fake();
    department["hodId"] = json!(hod_id);
    department["hod"] = json!({ "id": hod_id, "name": hod_name, "email": "hod@example.edu" });
    department
}

pub fn student_json(id: &str, matric_number: &str, level: u32) -> Value {
    json!({
        "id": id,
        "matricNumber": matric_number,
        "departmentId": "dep_1",
        "level": level,
        "status": "ACTIVE"
    })
}

pub fn session_json(id: &str, label: &str, active: bool) -> Value {
    json!({
        "id": id,
        "label": label,
        "startDate": "2025-09-01T00:00:00Z",
        "endDate": "2026-07-31T00:00:00Z",
        "isActive": active
    })
}

pub fn success() -> Value {
    json!({ "success": true })
}
