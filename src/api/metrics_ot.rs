//! Metrics-over-time endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, post, put, web};
use uuid::Uuid;

use super::{created, list_response, upsert};
use crate::db::MetricOverTimeCrud;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatedResponse, MetricOverTime, MetricOverTimeCreate, MetricOverTimeFilter,
    MetricOverTimePatch, MetricOverTimeUpdate, PageLimits, PageParams,
};

/// Record a metric over time.
#[utoipa::path(
    post,
    path = "/api/v2/metrics-ot",
    tag = "Metrics over time",
    request_body = MetricOverTimeCreate,
    responses(
        (status = 201, description = "Created; Location points at the new row", body = CreatedResponse),
        (status = 404, description = "Test run or test does not exist", body = ErrorResponse),
        (status = 409, description = "Identifier already in use", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[post("/metrics-ot")]
pub async fn create_metric_ot(
    req: HttpRequest,
    crud: MetricOverTimeCrud,
    body: web::Json<MetricOverTimeCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    let id = crud.create(payload).await?;
    Ok(created(&req, id))
}

/// Replace a metric over time, creating it if the id is unused.
#[utoipa::path(
    put,
    path = "/api/v2/metrics-ot/{id}",
    tag = "Metrics over time",
    params(
        ("id" = Uuid, Path, description = "Metric over time UUID")
    ),
    request_body = MetricOverTimeUpdate,
    responses(
        (status = 204, description = "Updated"),
        (status = 201, description = "Created with the given id", body = CreatedResponse),
        (status = 409, description = "Create conflicted or a parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[put("/metrics-ot/{id}")]
pub async fn put_metric_ot(
    req: HttpRequest,
    crud: MetricOverTimeCrud,
    path: web::Path<Uuid>,
    body: web::Json<MetricOverTimeUpdate>,
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
    path = "/api/v2/metrics-ot/{id}",
    tag = "Metrics over time",
    params(
        ("id" = Uuid, Path, description = "Metric over time UUID")
    ),
    request_body = MetricOverTimePatch,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not found, or a referenced parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[patch("/metrics-ot/{id}")]
pub async fn patch_metric_ot(
    crud: MetricOverTimeCrud,
    path: web::Path<Uuid>,
    body: web::Json<MetricOverTimePatch>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    crud.update(path.into_inner(), payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v2/metrics-ot/{id}",
    tag = "Metrics over time",
    params(
        ("id" = Uuid, Path, description = "Metric over time UUID")
    ),
    responses(
        (status = 200, description = "Metric over time", body = MetricOverTime),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
#[get("/metrics-ot/{id}")]
pub async fn get_metric_ot(
    crud: MetricOverTimeCrud,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let metric = crud.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(metric))
}

/// List metrics over time, newest first.
#[utoipa::path(
    get,
    path = "/api/v2/metrics-ot",
    tag = "Metrics over time",
    params(
        ("test_run_id" = Option<Uuid>, Query, description = "Filter by test run"),
        ("test_id" = Option<Uuid>, Query, description = "Filter by test"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Rows per page (default 100, clamped to the server maximum)")
    ),
    responses(
        (status = 200, description = "One page of results", body = [MetricOverTime],
            headers(("X-Total-Count" = u64, description = "Rows matching the filters"))),
        (status = 422, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/metrics-ot")]
pub async fn list_metrics_ot(
    crud: MetricOverTimeCrud,
    filter: web::Query<MetricOverTimeFilter>,
    paging: web::Query<PageParams>,
    limits: web::Data<PageLimits>,
) -> AppResult<HttpResponse> {
    let page = paging.resolve(*limits.get_ref())?;
    let collection = crud.get_all(&filter, page).await?;
    Ok(list_response(collection))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_metric_ot)
        .service(list_metrics_ot)
        .service(get_metric_ot)
        .service(put_metric_ot)
        .service(patch_metric_ot);
}
