//! E2E tests: progress samples.

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

/// (1) Progress outside 0..=100 → 422.
#[actix_rt::test]
async fn test_progress_bounds() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    for value in [-0.5, 100.5] {
        let reply = post(
            &app,
            "/api/v2/progress",
            json!({"test_run_id": run, "name": "suite", "progress": value}),
        )
        .await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

/// (2) Latest sample first; PUT upserts.
#[actix_rt::test]
async fn test_progress_listing_and_put() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;

    for (second, pct) in [(0, 10.0), (30, 55.0)] {
        create(
            &app,
            "/api/v2/progress",
            json!({
                "test_run_id": run,
                "name": "suite",
                "progress": pct,
                "timestamp": format!("2025-01-01T09:00:{:02}Z", second),
            }),
        )
        .await;
    }

    let uri = format!("/api/v2/progress/{}", Uuid::new_v4());
    let reply = put(
        &app,
        &uri,
        json!({
            "test_run_id": run,
            "name": "suite",
            "progress": 100.0,
            "timestamp": "2025-01-01T09:01:00Z",
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let reply = get(&app, &format!("/api/v2/progress?test_run_id={}", run)).await;
    assert_eq!(reply.total_count, Some(3));
    assert_eq!(reply.body[0]["progress"], 100.0);
    assert_eq!(reply.body[2]["progress"], 10.0);
}
