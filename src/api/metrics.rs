//! Metric endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, post, put, web};
use uuid::Uuid;

use super::{created, list_response, upsert};
use crate::db::MetricCrud;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatedResponse, Metric, MetricCreate, MetricFilter, MetricPatch, MetricUpdate, PageLimits,
    PageParams,
};

/// Record a metric.
#[utoipa::path(
    post,
    path = "/api/v2/metrics",
    tag = "Metrics",
    request_body = MetricCreate,
    responses(
        (status = 201, description = "Created; Location points at the new row", body = CreatedResponse),
        (status = 404, description = "Test run or test does not exist", body = ErrorResponse),
        (status = 409, description = "Identifier already in use", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[post("/metrics")]
pub async fn create_metric(
    req: HttpRequest,
    crud: MetricCrud,
    body: web::Json<MetricCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    let id = crud.create(payload).await?;
    Ok(created(&req, id))
}

/// Replace a metric, creating it if the id is unused.
#[utoipa::path(
    put,
    path = "/api/v2/metrics/{id}",
    tag = "Metrics",
    params(
        ("id" = Uuid, Path, description = "Metric UUID")
    ),
    request_body = MetricUpdate,
    responses(
        (status = 204, description = "Updated"),
        (status = 201, description = "Created with the given id", body = CreatedResponse),
        (status = 409, description = "Create conflicted or a parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[put("/metrics/{id}")]
pub async fn put_metric(
    req: HttpRequest,
    crud: MetricCrud,
    path: web::Path<Uuid>,
    body: web::Json<MetricUpdate>,
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
    path = "/api/v2/metrics/{id}",
    tag = "Metrics",
    params(
        ("id" = Uuid, Path, description = "Metric UUID")
    ),
    request_body = MetricPatch,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not found, or a referenced parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[patch("/metrics/{id}")]
pub async fn patch_metric(
    crud: MetricCrud,
    path: web::Path<Uuid>,
    body: web::Json<MetricPatch>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    crud.update(path.into_inner(), payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v2/metrics/{id}",
    tag = "Metrics",
    params(
        ("id" = Uuid, Path, description = "Metric UUID")
    ),
    responses(
        (status = 200, description = "Metric", body = Metric),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
#[get("/metrics/{id}")]
pub async fn get_metric(
    crud: MetricCrud,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let metric = crud.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(metric))
}

/// List metrics, newest first.
#[utoipa::path(
    get,
    path = "/api/v2/metrics",
    tag = "Metrics",
    params(
        ("test_run_id" = Option<Uuid>, Query, description = "Filter by test run"),
        ("test_id" = Option<Uuid>, Query, description = "Filter by test"),
        ("name" = Option<String>, Query, description = "Filter by exact name"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Rows per page (default 100, clamped to the server maximum)")
    ),
    responses(
        (status = 200, description = "One page of results", body = [Metric],
            headers(("X-Total-Count" = u64, description = "Rows matching the filters"))),
        (status = 422, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/metrics")]
pub async fn list_metrics(
    crud: MetricCrud,
    filter: web::Query<MetricFilter>,
    paging: web::Query<PageParams>,
    limits: web::Data<PageLimits>,
) -> AppResult<HttpResponse> {
    let page = paging.resolve(*limits.get_ref())?;
    let collection = crud.get_all(&filter, page).await?;
    Ok(list_response(collection))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_metric)
        .service(list_metrics)
        .service(get_metric)
        .service(put_metric)
        .service(patch_metric);
}
