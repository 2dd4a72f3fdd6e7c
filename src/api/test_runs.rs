//! Test run endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, post, put, web};
use uuid::Uuid;

use super::{created, list_response, upsert};
use crate::db::TestRunCrud;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatedResponse, PageLimits, PageParams, TestRun, TestRunCreate, TestRunFilter, TestRunPatch,
    TestRunUpdate,
};

/// Start recording a test run.
#[utoipa::path(
    post,
    path = "/api/v2/test-runs",
    tag = "Test runs",
    request_body = TestRunCreate,
    responses(
        (status = 201, description = "Created; Location points at the new row", body = CreatedResponse),
        (status = 404, description = "Project does not exist", body = ErrorResponse),
        (status = 409, description = "Identifier already in use", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[post("/test-runs")]
pub async fn create_test_run(
    req: HttpRequest,
    crud: TestRunCrud,
    body: web::Json<TestRunCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    let id = crud.create(payload).await?;
    Ok(created(&req, id))
}

/// Replace a test run, creating it if the id is unused.
#[utoipa::path(
    put,
    path = "/api/v2/test-runs/{id}",
    tag = "Test runs",
    params(
        ("id" = Uuid, Path, description = "Test run UUID")
    ),
    request_body = TestRunUpdate,
    responses(
        (status = 204, description = "Updated"),
        (status = 201, description = "Created with the given id", body = CreatedResponse),
        (status = 409, description = "Create conflicted or a parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[put("/test-runs/{id}")]
pub async fn put_test_run(
    req: HttpRequest,
    crud: TestRunCrud,
    path: web::Path<Uuid>,
    body: web::Json<TestRunUpdate>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = body.into_inner().validate()?;

    let outcome = upsert(crud.update(id, payload.clone()), || {
        Ok(crud.create(payload.into_create(id)?))
    })
    .await?;

    Ok(outcome.into_response(&req))
}

/// Change only the fields present in the body.
#[utoipa::path(
    patch,
    path = "/api/v2/test-runs/{id}",
    tag = "Test runs",
    params(
        ("id" = Uuid, Path, description = "Test run UUID")
    ),
    request_body = TestRunPatch,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not found, or a referenced parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[patch("/test-runs/{id}")]
pub async fn patch_test_run(
    crud: TestRunCrud,
    path: web::Path<Uuid>,
    body: web::Json<TestRunPatch>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    crud.update(path.into_inner(), payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v2/test-runs/{id}",
    tag = "Test runs",
    params(
        ("id" = Uuid, Path, description = "Test run UUID")
    ),
    responses(
        (status = 200, description = "Test run", body = TestRun),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
#[get("/test-runs/{id}")]
pub async fn get_test_run(
    crud: TestRunCrud,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let test_run = crud.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(test_run))
}

/// List test runs, most recently started first.
#[utoipa::path(
    get,
    path = "/api/v2/test-runs",
    tag = "Test runs",
    params(
        ("project_id" = Option<Uuid>, Query, description = "Filter by project"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Rows per page (default 100, clamped to the server maximum)")
    ),
    responses(
        (status = 200, description = "One page of results", body = [TestRun],
            headers(("X-Total-Count" = u64, description = "Rows matching the filters"))),
        (status = 422, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/test-runs")]
pub async fn list_test_runs(
    crud: TestRunCrud,
    filter: web::Query<TestRunFilter>,
    paging: web::Query<PageParams>,
    limits: web::Data<PageLimits>,
) -> AppResult<HttpResponse> {
    let page = paging.resolve(*limits.get_ref())?;
    let collection = crud.get_all(&filter, page).await?;
    Ok(list_response(collection))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_test_run)
        .service(list_test_runs)
        .service(get_test_run)
        .service(put_test_run)
        .service(patch_test_run);
}
