//! Log endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, post, put, web};
use uuid::Uuid;

use super::{created, list_response, upsert};
use crate::db::LogCrud;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatedResponse, Log, LogCreate, LogFilter, LogPatch, LogUpdate, PageLimits, PageParams,
};

/// Record a log line.
#[utoipa::path(
    post,
    path = "/api/v2/logs",
    tag = "Logs",
    request_body = LogCreate,
    responses(
        (status = 201, description = "Created; Location points at the new row", body = CreatedResponse),
        (status = 404, description = "Test run or test does not exist", body = ErrorResponse),
        (status = 409, description = "Identifier already in use", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[post("/logs")]
pub async fn create_log(
    req: HttpRequest,
    crud: LogCrud,
    body: web::Json<LogCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    let id = crud.create(payload).await?;
    Ok(created(&req, id))
}

/// Replace a log line, creating it if the id is unused.
#[utoipa::path(
    put,
    path = "/api/v2/logs/{id}",
    tag = "Logs",
    params(
        ("id" = Uuid, Path, description = "Log UUID")
    ),
    request_body = LogUpdate,
    responses(
        (status = 204, description = "Updated"),
        (status = 201, description = "Created with the given id", body = CreatedResponse),
        (status = 409, description = "Create conflicted or a parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[put("/logs/{id}")]
pub async fn put_log(
    req: HttpRequest,
    crud: LogCrud,
    path: web::Path<Uuid>,
    body: web::Json<LogUpdate>,
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
    path = "/api/v2/logs/{id}",
    tag = "Logs",
    params(
        ("id" = Uuid, Path, description = "Log UUID")
    ),
    request_body = LogPatch,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not found, or a referenced parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[patch("/logs/{id}")]
pub async fn patch_log(
    crud: LogCrud,
    path: web::Path<Uuid>,
    body: web::Json<LogPatch>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    crud.update(path.into_inner(), payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v2/logs/{id}",
    tag = "Logs",
    params(
        ("id" = Uuid, Path, description = "Log UUID")
    ),
    responses(
        (status = 200, description = "Log line", body = Log),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
#[get("/logs/{id}")]
pub async fn get_log(
    crud: LogCrud,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let log = crud.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(log))
}

/// List log lines, newest first.
#[utoipa::path(
    get,
    path = "/api/v2/logs",
    tag = "Logs",
    params(
        ("test_run_id" = Option<Uuid>, Query, description = "Filter by test run"),
        ("test_id" = Option<Uuid>, Query, description = "Filter by test"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Rows per page (default 100, clamped to the server maximum)")
    ),
    responses(
        (status = 200, description = "One page of results", body = [Log],
            headers(("X-Total-Count" = u64, description = "Rows matching the filters"))),
        (status = 422, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/logs")]
pub async fn list_logs(
    crud: LogCrud,
    filter: web::Query<LogFilter>,
    paging: web::Query<PageParams>,
    limits: web::Data<PageLimits>,
) -> AppResult<HttpResponse> {
    let page = paging.resolve(*limits.get_ref())?;
    let collection = crud.get_all(&filter, page).await?;
    Ok(list_response(collection))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_log)
        .service(list_logs)
        .service(get_log)
        .service(put_log)
        .service(patch_log);
}
