//! E2E tests: projects.

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

/// (1) Create with config, read it back, patch the name only.
#[actix_rt::test]
async fn test_project_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let id = create(
        &app,
        "/api/v2/projects",
        json!({"name": "mobile", "config": {"retries": 2, "platforms": ["ios"]}}),
    )
    .await;
    let uri = format!("/api/v2/projects/{}", id);

    let reply = patch(&app, &uri, json!({"name": "mobile-app"})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let project = get(&app, &uri).await.body;
    assert_eq!(project["name"], "mobile-app");
    assert_eq!(project["config"]["retries"], 2);
    assert_eq!(project["config"]["platforms"], json!(["ios"]));
}

/// (2) Blank or oversized names are rejected.
#[actix_rt::test]
async fn test_project_name_rules() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let reply = post(&app, "/api/v2/projects", json!({"name": "   "})).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = post(&app, "/api/v2/projects", json!({"name": "p".repeat(257)})).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = post(&app, "/api/v2/projects", json!({"name": "ok", "config": "nope"})).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// (3) PUT without parent keys can always create a project.
#[actix_rt::test]
async fn test_project_put_upsert() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let uri = format!("/api/v2/projects/{}", Uuid::new_v4());
    let reply = put(&app, &uri, json!({"name": "desktop"})).await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let reply = put(&app, &uri, json!({"name": "desktop", "config": {"a": 1}})).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.body["config"]["a"], 1);
}

/// (4) Listing is alphabetical and filterable by name.
#[actix_rt::test]
async fn test_project_listing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    for name in ["webapp", "desktop", "mobile"] {
        create(&app, "/api/v2/projects", json!({"name": name})).await;
    }

    let reply = get(&app, "/api/v2/projects?page_size=2").await;
    assert_eq!(reply.total_count, Some(3));
    assert_eq!(reply.body[0]["name"], "desktop");
    assert_eq!(reply.body[1]["name"], "mobile");

    let reply = get(&app, "/api/v2/projects?name=webapp").await;
    assert_eq!(reply.total_count, Some(1));
    assert_eq!(reply.body[0]["name"], "webapp");
}
