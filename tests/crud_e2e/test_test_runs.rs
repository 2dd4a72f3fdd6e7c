//! E2E tests: test runs.

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

/// (1) A run under an unknown project → 404.
#[actix_rt::test]
async fn test_run_requires_project() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let reply = post(
        &app,
        "/api/v2/test-runs",
        json!({"project_id": Uuid::new_v4(), "status": "running"}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

/// (2) Finish a run with a patch; null end_time reopens it.
#[actix_rt::test]
async fn test_run_finish_and_reopen() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;
    let uri = format!("/api/v2/test-runs/{}", run);

    let reply = patch(
        &app,
        &uri,
        json!({"status": "passed", "end_time": "2025-02-01T10:30:00Z"}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let stored = get(&app, &uri).await.body;
    assert_eq!(stored["status"], "passed");
    assert!(stored["end_time"].as_str().unwrap().starts_with("2025-02-01T10:30:00"));

    patch(&app, &uri, json!({"end_time": null})).await;
    let stored = get(&app, &uri).await.body;
    assert!(stored["end_time"].is_null());
    assert_eq!(stored["status"], "passed");
}

/// (3) Listing by project and status, newest start first.
#[actix_rt::test]
async fn test_run_listing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project = create(&app, "/api/v2/projects", json!({"name": "web"})).await;

    for (day, status) in [(1, "failed"), (2, "passed"), (3, "failed")] {
        create(
            &app,
            "/api/v2/test-runs",
            json!({
                "project_id": project,
                "name": format!("nightly-{}", day),
                "status": status,
                "variant": {"browser": "firefox"},
                "start_time": format!("2025-01-0{}T00:00:00Z", day),
            }),
        )
        .await;
    }

    let reply = get(
        &app,
        &format!("/api/v2/test-runs?project_id={}&status=failed", project),
    )
    .await;
    assert_eq!(reply.total_count, Some(2));
    assert_eq!(reply.body[0]["name"], "nightly-3");
    assert_eq!(reply.body[1]["name"], "nightly-1");
    assert_eq!(reply.body[0]["variant"]["browser"], "firefox");
}
