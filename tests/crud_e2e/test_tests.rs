//! E2E tests: tests within a run.

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

/// (1) Create with params and path; patch clears the path.
#[actix_rt::test]
async fn test_test_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let id = create(
        &app,
        "/api/v2/tests",
        json!({
            "test_run_id": run,
            "name": "checkout",
            "path": "e2e/checkout.spec.ts",
            "params": {"retries": "2"},
            "status": "failed",
        }),
    )
    .await;
    let uri = format!("/api/v2/tests/{}", id);

    let stored = get(&app, &uri).await.body;
    assert_eq!(stored["params"]["retries"], "2");
    assert_eq!(stored["path"], "e2e/checkout.spec.ts");

    let reply = patch(&app, &uri, json!({"path": null, "status": "passed"})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let stored = get(&app, &uri).await.body;
    assert!(stored["path"].is_null());
    assert_eq!(stored["status"], "passed");
    assert_eq!(stored["name"], "checkout");
}

/// (2) Params must map strings to strings.
#[actix_rt::test]
async fn test_test_params_are_strings() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let reply = post(
        &app,
        "/api/v2/tests",
        json!({"test_run_id": run, "name": "a", "status": "passed", "params": {"n": 1}}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// (3) PUT on an unused id with an unknown run → 409.
#[actix_rt::test]
async fn test_test_put_unknown_run() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let reply = put(
        &app,
        &format!("/api/v2/tests/{}", Uuid::new_v4()),
        json!({
            "test_run_id": Uuid::new_v4(),
            "name": "login",
            "status": "passed",
            "start_time": "2025-01-01T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

/// (4) Listing by run.
#[actix_rt::test]
async fn test_test_listing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;
    let other = seed_test_run(&app).await;

    seed_test(&app, run).await;
    seed_test(&app, run).await;
    seed_test(&app, other).await;

    let reply = get(&app, &format!("/api/v2/tests?test_run_id={}", run)).await;
    assert_eq!(reply.total_count, Some(2));
    assert_eq!(reply.body.as_array().unwrap().len(), 2);
}
