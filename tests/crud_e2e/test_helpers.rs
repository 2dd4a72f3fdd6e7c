//! Shared test helpers for CRUD E2E tests.

use actix_web::http::StatusCode;
use actix_web::{App, dev::ServiceResponse, test, web};
use agnostic_lib::api;
use agnostic_lib::config::DatabaseConfig;
use agnostic_lib::db::DbPool;
use agnostic_lib::models::PageLimits;
use serde_json::{Value, json};
use uuid::Uuid;

/// Create a fresh, migrated in-memory database.
pub async fn create_test_pool() -> DbPool {
    let pool = DbPool::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a test app with the default page limits.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    create_test_app_with_limits(pool, PageLimits::default()).await
}

pub async fn create_test_app_with_limits(
    pool: &DbPool,
    limits: PageLimits,
) -> impl actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(limits))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .app_data(api::path_config())
            .service(
                web::scope(api::API_PREFIX)
                    .configure(api::configure_health_routes)
                    .configure(api::configure_routes)
                    .service(api::openapi::openapi_json),
            ),
    )
    .await
}

/// Response pieces the tests look at.
pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub total_count: Option<u64>,
    pub body: Value,
}

async fn send<S>(app: &S, req: test::TestRequest) -> Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let location = header("location");
    let total_count = header("x-total-count").and_then(|v| v.parse().ok());

    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };

    Reply {
        status,
        location,
        total_count,
        body,
    }
}

pub async fn post<S>(app: &S, uri: &str, body: Value) -> Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::post().uri(uri).set_json(body)).await
}

pub async fn put<S>(app: &S, uri: &str, body: Value) -> Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::put().uri(uri).set_json(body)).await
}

pub async fn patch<S>(app: &S, uri: &str, body: Value) -> Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::patch().uri(uri).set_json(body)).await
}

pub async fn get<S>(app: &S, uri: &str) -> Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::get().uri(uri)).await
}

/// POST a raw body with an explicit Content-Type.
pub async fn post_raw<S>(app: &S, uri: &str, content_type: &str, body: &'static str) -> Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(
        app,
        test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", content_type))
            .set_payload(body),
    )
    .await
}

/// POST and return the new id, asserting a 201.
pub async fn create<S>(app: &S, uri: &str, body: Value) -> Uuid
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let reply = post(app, uri, body).await;
    assert_eq!(
        reply.status,
        StatusCode::CREATED,
        "Create at {} failed: {:?}",
        uri,
        reply.body
    );
    let id = reply.body["id"].as_str().expect("id in create response");
    Uuid::parse_str(id).expect("id is a UUID")
}

/// Create a project and a test run under it; returns the run id.
pub async fn seed_test_run<S>(app: &S) -> Uuid
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let project_id = create(app, "/api/v2/projects", json!({"name": "mobile"})).await;
    create(
        app,
        "/api/v2/test-runs",
        json!({"project_id": project_id, "status": "running"}),
    )
    .await
}

pub async fn seed_test<S>(app: &S, test_run_id: Uuid) -> Uuid
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    create(
        app,
        "/api/v2/tests",
        json!({"test_run_id": test_run_id, "name": "login", "status": "passed"}),
    )
    .await
}
