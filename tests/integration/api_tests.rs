//! API integration tests
//!
//! These need a running server backed by a fresh database.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Suffix that keeps unique names unique across runs
fn unique(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

async fn post(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

struct Fixture {
    employee_id: i64,
    device_id: i64,
    serial: String,
}

/// One branch, producer, type, employee and available device
async fn fixture(client: &Client) -> Fixture {
    let (_, branch) = post(client, "/branches", json!({ "name": unique("Branch") })).await;
    let (_, producer) = post(client, "/producers", json!({ "name": unique("Producer") })).await;
    let (_, device_type) = post(client, "/device-types", json!({ "name": unique("Type") })).await;

    let (status, employee) = post(
        client,
        "/employees",
        json!({
            "name": "Jan",
            "lastName": "Kowalski",
            "email": format!("{}@ems.local", unique("jan")),
            "branchId": branch["id"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let serial = unique("SN");
    let (status, device) = post(
        client,
        "/devices",
        json!({
            "typeId": device_type["id"],
            "producerId": producer["id"],
            "serialNumber": serial,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    Fixture {
        employee_id: employee["id"].as_i64().expect("employee id"),
        device_id: device["id"].as_i64().expect("device id"),
        serial,
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let (status, body) = get(&client, "/health").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_check() {
    let client = Client::new();

    let (status, body) = get(&client, "/ready").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_issue_and_return_loan() {
    let client = Client::new();
    let f = fixture(&client).await;

    let (status, loan) = post(
        &client,
        "/loans",
        json!({ "employeeId": f.employee_id, "deviceId": f.device_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["deviceSerialNumber"], f.serial.as_str());
    assert_eq!(loan["returned"], false);

    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;
    assert_eq!(device["available"], false);

    let (status, active) = get(&client, &format!("/employees/{}/loans/active", f.employee_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active.as_array().map(Vec::len), Some(1));

    let (status, returned) = post(&client, &format!("/loans/{}/return", loan["id"]), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["returned"], true);
    assert!(returned["returnDate"].is_string());

    let (status, _) = post(&client, &format!("/loans/{}/return", loan["id"]), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;
    assert_eq!(device["available"], true);

    let (_, history) = get(&client, &format!("/employees/{}/loans/history", f.employee_id)).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_issue_of_one_device() {
    let client = Client::new();
    let f = fixture(&client).await;
    let body = json!({ "employeeId": f.employee_id, "deviceId": f.device_id });

    let (first, second) = tokio::join!(
        post(&client, "/loans", body.clone()),
        post(&client, "/loans", body.clone())
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number() {
    let client = Client::new();
    let f = fixture(&client).await;
    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;

    let (status, body) = post(
        &client,
        "/devices",
        json!({
            "typeId": device["typeId"],
            "producerId": device["producerId"],
            "serialNumber": format!("  {}  ", f.serial.to_lowercase()),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
#[ignore]
async fn test_blank_serial_number_rejected() {
    let client = Client::new();
    let f = fixture(&client).await;
    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;

    let (status, _) = post(
        &client,
        "/devices",
        json!({
            "typeId": device["typeId"],
            "producerId": device["producerId"],
            "serialNumber": "   ",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_loan_for_unknown_employee() {
    let client = Client::new();
    let f = fixture(&client).await;

    let (status, _) = post(
        &client,
        "/loans",
        json!({ "employeeId": i32::MAX, "deviceId": f.device_id }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;
    assert_eq!(device["available"], true);
}

#[tokio::test]
#[ignore]
async fn test_delete_employee_releases_devices() {
    let client = Client::new();
    let f = fixture(&client).await;
    post(
        &client,
        "/loans",
        json!({ "employeeId": f.employee_id, "deviceId": f.device_id }),
    )
    .await;

    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, f.employee_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;
    assert_eq!(device["available"], true);
}

async fn put(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore]
async fn test_reference_names_unique_ignoring_case_and_padding() {
    let client = Client::new();

    for path in ["/producers", "/device-types"] {
        let name = unique("Acme");
        let (status, created) = post(&client, path, json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["deviceCount"], 0);

        let (status, body) = post(
            &client,
            path,
            json!({ "name": format!("  {}  ", name.to_uppercase()) }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Duplicate");

        let (status, renamed) = put(
            &client,
            &format!("{}/{}", path, created["id"]),
            json!({ "name": name.to_lowercase() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], name.to_lowercase().as_str());

        let (_, other) = post(&client, path, json!({ "name": unique("Other") })).await;
        let (status, _) = put(
            &client,
            &format!("{}/{}", path, other["id"]),
            json!({ "name": name }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}

#[tokio::test]
#[ignore]
async fn test_branch_names_may_repeat() {
    let client = Client::new();
    let name = unique("Warsaw");

    let (first, _) = post(&client, "/branches", json!({ "name": name })).await;
    let (second, body) = post(&client, "/branches", json!({ "name": format!(" {} ", name) })).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    assert_eq!(body["name"], name.as_str());
}

#[tokio::test]
#[ignore]
async fn test_employee_with_unknown_branch_rejected() {
    let client = Client::new();

    let (status, body) = post(
        &client,
        "/employees",
        json!({
            "name": "Anna",
            "lastName": "Nowak",
            "email": format!("{}@ems.local", unique("anna")),
            "branchId": i32::MAX,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_update_of_returned_loan_keeps_relent_device_locked() {
    let client = Client::new();
    let f = fixture(&client).await;
    let body = json!({ "employeeId": f.employee_id, "deviceId": f.device_id });

    let (_, old) = post(&client, "/loans", body.clone()).await;
    post(&client, &format!("/loans/{}/return", old["id"]), json!({})).await;
    let (status, _) = post(&client, "/loans", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = put(
        &client,
        &format!("/loans/{}", old["id"]),
        json!({ "returned": true, "returnDate": chrono::Utc::now() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, device) = get(&client, &format!("/devices/{}", f.device_id)).await;
    assert_eq!(device["available"], false);
}
