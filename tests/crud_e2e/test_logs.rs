//! E2E tests: log lines.

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

/// (1) Create, read, patch the level; the message is kept verbatim.
#[actix_rt::test]
async fn test_log_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;
    let test = seed_test(&app, run).await;

    let reply = post(
        &app,
        "/api/v2/logs",
        json!({
            "test_run_id": run,
            "test_id": test,
            "name": "browser-console",
            "level": "error",
            "message": "  TypeError: x is undefined",
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    let location = reply.location.expect("Location header");

    let stored = get(&app, &location).await.body;
    assert_eq!(stored["message"], "  TypeError: x is undefined");
    assert_eq!(stored["test_id"], json!(test));

    let reply = patch(&app, &location, json!({"level": "warn", "test_id": null})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let stored = get(&app, &location).await.body;
    assert_eq!(stored["level"], "warn");
    assert!(stored["test_id"].is_null());
    assert_eq!(stored["name"], "browser-console");
}

/// (2) Unknown run → 404; blank level → 422.
#[actix_rt::test]
async fn test_log_rejections() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let reply = post(
        &app,
        "/api/v2/logs",
        json!({"test_run_id": Uuid::new_v4(), "name": "c", "level": "info", "message": "m"}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "PARENT_NOT_FOUND");

    let run = seed_test_run(&app).await;
    let reply = post(
        &app,
        "/api/v2/logs",
        json!({"test_run_id": run, "name": "c", "level": " ", "message": "m"}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// (3) PUT creates, second PUT updates; listing is newest first by test.
#[actix_rt::test]
async fn test_log_put_and_list() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let run = seed_test_run(&app).await;
    let test = seed_test(&app, run).await;

    for second in 0..3 {
        create(
            &app,
            "/api/v2/logs",
            json!({
                "test_run_id": run,
                "test_id": test,
                "name": "runner",
                "level": "info",
                "message": format!("step {}", second),
                "timestamp": format!("2025-01-01T08:00:0{}Z", second),
            }),
        )
        .await;
    }

    let uri = format!("/api/v2/logs/{}", Uuid::new_v4());
    let body = json!({
        "test_run_id": run,
        "name": "runner",
        "level": "info",
        "message": "run finished",
        "timestamp": "2025-01-01T08:01:00Z",
    });
    assert_eq!(put(&app, &uri, body.clone()).await.status, StatusCode::CREATED);
    assert_eq!(put(&app, &uri, body).await.status, StatusCode::NO_CONTENT);

    let reply = get(&app, &format!("/api/v2/logs?test_id={}", test)).await;
    assert_eq!(reply.total_count, Some(3));
    assert_eq!(reply.body[0]["message"], "step 2");

    let reply = get(&app, &format!("/api/v2/logs?test_run_id={}&page_size=1", run)).await;
    assert_eq!(reply.total_count, Some(4));
    assert_eq!(reply.body[0]["message"], "run finished");
}
