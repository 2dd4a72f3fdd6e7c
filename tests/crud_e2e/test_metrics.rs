//! E2E tests: single-valued metrics.

use actix_web::http::StatusCode;
use serde_json::json;

use super::test_helpers::*;

/// (1) Create, patch value to null, unit untouched.
#[actix_rt::test]
async fn test_metric_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let id = create(
        &app,
        "/api/v2/metrics",
        json!({"test_run_id": run, "name": "ttfb", "unit": "ms", "value": 120.5}),
    )
    .await;
    let uri = format!("/api/v2/metrics/{}", id);

    assert_eq!(get(&app, &uri).await.body["value"], 120.5);

    let reply = patch(&app, &uri, json!({"value": null})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let stored = get(&app, &uri).await.body;
    assert!(stored["value"].is_null());
    assert_eq!(stored["unit"], "ms");
}

/// (2) Unit longer than 32 characters → 422.
#[actix_rt::test]
async fn test_metric_unit_limit() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    let reply = post(
        &app,
        "/api/v2/metrics",
        json!({"test_run_id": run, "name": "ttfb", "unit": "u".repeat(33)}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        reply.body["message"]
            .as_str()
            .unwrap()
            .contains("unit: must be at most 32 characters")
    );
}

/// (3) Filter by name within a run.
#[actix_rt::test]
async fn test_metric_listing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    for name in ["ttfb", "ttfb", "errors"] {
        create(
            &app,
            "/api/v2/metrics",
            json!({"test_run_id": run, "name": name, "value": 1.0}),
        )
        .await;
    }

    let reply = get(&app, &format!("/api/v2/metrics?test_run_id={}&name=ttfb", run)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.total_count, Some(2));
}
