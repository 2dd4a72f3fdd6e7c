//! E2E tests: metrics over time.

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

/// (1) Create, read, patch, read again: only the patched field changes.
#[actix_rt::test]
async fn test_latency_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let reply = post(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "latency", "values": {"p50": 12.3}, "test_run_id": run}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);

    let location = reply.location.expect("Location header");
    let id: Uuid = location
        .rsplit('/')
        .next()
        .and_then(|s| s.parse().ok())
        .expect("Location ends with a UUID");
    assert_eq!(location, format!("/api/v2/metrics-ot/{}", id));
    assert_eq!(reply.body["id"], json!(id));

    let reply = get(&app, &location).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["name"], "latency");
    assert_eq!(reply.body["test_run_id"], json!(run));
    assert!(reply.body["test_id"].is_null());
    assert!(reply.body["timestamp"].is_string());
    let original_values = reply.body["values"].clone();

    let reply = patch(&app, &location, json!({"name": "latency_ms"})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = get(&app, &location).await;
    assert_eq!(reply.body["name"], "latency_ms");
    assert_eq!(reply.body["values"], original_values);
    assert_eq!(reply.body["values"]["p50"], json!(12.3));
}

/// (2) Same explicit id twice → 409.
#[actix_rt::test]
async fn test_duplicate_id_conflicts() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let body = json!({
        "id": Uuid::new_v4(),
        "name": "latency",
        "values": {},
        "test_run_id": run,
    });

    assert_eq!(
        post(&app, "/api/v2/metrics-ot", body.clone()).await.status,
        StatusCode::CREATED
    );
    let reply = post(&app, "/api/v2/metrics-ot", body).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["error"], "CONFLICT");
}

/// (3) Unknown parent → 404 with its own code.
#[actix_rt::test]
async fn test_missing_parent_is_404() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let reply = post(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "latency", "values": {}, "test_run_id": Uuid::new_v4()}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "PARENT_NOT_FOUND");
}

/// (4) PATCH, GET on an unknown id → 404.
#[actix_rt::test]
async fn test_unknown_id() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let uri = format!("/api/v2/metrics-ot/{}", Uuid::new_v4());

    let reply = patch(&app, &uri, json!({"name": "x"})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "NOT_FOUND");

    let reply = patch(&app, &uri, json!({})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    assert_eq!(get(&app, &uri).await.status, StatusCode::NOT_FOUND);
}

/// (5) PUT on an unused id creates it.
#[actix_rt::test]
async fn test_put_creates_when_missing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let id = Uuid::new_v4();
    let uri = format!("/api/v2/metrics-ot/{}", id);
    let body = json!({
        "test_run_id": run,
        "timestamp": "2025-03-01T12:00:00Z",
        "name": "memory",
        "values": {"rss": 512.0, "heap": null},
    });

    let reply = put(&app, &uri, body.clone()).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    assert_eq!(reply.location.as_deref(), Some(uri.as_str()));
    assert_eq!(reply.body["id"], json!(id));

    let stored = get(&app, &uri).await.body;
    assert_eq!(stored["name"], "memory");
    assert!(stored["values"]["heap"].is_null());

    // Second PUT is a plain update
    let mut body = body;
    body["name"] = json!("memory_mb");
    let reply = put(&app, &uri, body).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.body["name"], "memory_mb");
}

/// (6) PUT fallback without a test run, or with an unknown one → 422 / 409.
#[actix_rt::test]
async fn test_put_fallback_failures() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let uri = format!("/api/v2/metrics-ot/{}", Uuid::new_v4());

    let reply = put(
        &app,
        &uri,
        json!({"timestamp": "2025-03-01T12:00:00Z", "name": "memory", "values": {}}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        reply.body["message"]
            .as_str()
            .unwrap()
            .contains("test_run_id")
    );

    let reply = put(
        &app,
        &uri,
        json!({
            "test_run_id": Uuid::new_v4(),
            "timestamp": "2025-03-01T12:00:00Z",
            "name": "memory",
            "values": {},
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

/// (7) PUT moving an existing row to an unknown test run → 409, row unchanged.
#[actix_rt::test]
async fn test_put_with_bad_parent_on_existing_row() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let id = create(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "latency", "values": {}, "test_run_id": run}),
    )
    .await;
    let uri = format!("/api/v2/metrics-ot/{}", id);

    let reply = put(
        &app,
        &uri,
        json!({
            "test_run_id": Uuid::new_v4(),
            "timestamp": "2025-03-01T12:00:00Z",
            "name": "latency",
            "values": {},
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(get(&app, &uri).await.body["test_run_id"], json!(run));
}

/// (8) PATCH pointing at an unknown parent → 404 PARENT_NOT_FOUND.
#[actix_rt::test]
async fn test_patch_with_bad_parent() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let id = create(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "latency", "values": {}, "test_run_id": run}),
    )
    .await;

    let reply = patch(
        &app,
        &format!("/api/v2/metrics-ot/{}", id),
        json!({"test_id": Uuid::new_v4()}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "PARENT_NOT_FOUND");
}

/// (9) page=2&page_size=10 returns items 11-20, newest first, with the full count.
#[actix_rt::test]
async fn test_pagination() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;
    let other_run = seed_test_run(&app).await;

    for minute in 0..25 {
        create(
            &app,
            "/api/v2/metrics-ot",
            json!({
                "test_run_id": run,
                "timestamp": format!("2025-01-01T10:{:02}:00Z", minute),
                "name": format!("sample-{:02}", minute),
                "values": {"v": minute},
            }),
        )
        .await;
    }
    create(
        &app,
        "/api/v2/metrics-ot",
        json!({"test_run_id": other_run, "name": "noise", "values": {}}),
    )
    .await;

    let reply = get(
        &app,
        &format!("/api/v2/metrics-ot?test_run_id={}&page=2&page_size=10", run),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.total_count, Some(25));

    let items = reply.body.as_array().expect("array body");
    let names: Vec<_> = items.iter().map(|m| m["name"].as_str().unwrap()).collect();
    let expected: Vec<_> = (5..15).rev().map(|i| format!("sample-{:02}", i)).collect();
    assert_eq!(names, expected);

    let reply = get(&app, "/api/v2/metrics-ot").await;
    assert_eq!(reply.total_count, Some(26));
    assert_eq!(reply.body.as_array().unwrap().len(), 26);
}

/// (10) Filtering by test.
#[actix_rt::test]
async fn test_filter_by_test() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;
    let test = seed_test(&app, run).await;

    create(
        &app,
        "/api/v2/metrics-ot",
        json!({"test_run_id": run, "test_id": test, "name": "cpu", "values": {}}),
    )
    .await;
    create(
        &app,
        "/api/v2/metrics-ot",
        json!({"test_run_id": run, "name": "cpu", "values": {}}),
    )
    .await;

    let reply = get(&app, &format!("/api/v2/metrics-ot?test_id={}", test)).await;
    assert_eq!(reply.total_count, Some(1));
    assert_eq!(reply.body[0]["test_id"], json!(test));
}

/// (11) Malformed input is rejected with 422 before touching the database.
#[actix_rt::test]
async fn test_validation_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let reply = post(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "x".repeat(129), "values": {}, "test_run_id": run}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["error"], "VALIDATION_ERROR");
    assert!(
        reply.body["message"]
            .as_str()
            .unwrap()
            .contains("name: must be at most 128 characters")
    );

    let reply = post(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "latency", "values": {"p50": "fast"}, "test_run_id": run}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = post(&app, "/api/v2/metrics-ot", json!({"name": "latency", "values": {}})).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = get(&app, "/api/v2/metrics-ot/not-a-uuid").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = get(&app, "/api/v2/metrics-ot?test_run_id=nope").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// (12) Name is stored trimmed.
#[actix_rt::test]
async fn test_name_is_trimmed() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let id = create(
        &app,
        "/api/v2/metrics-ot",
        json!({"name": "  latency  ", "values": {}, "test_run_id": run}),
    )
    .await;

    let reply = get(&app, &format!("/api/v2/metrics-ot/{}", id)).await;
    assert_eq!(reply.body["name"], "latency");
}
