//! Progress endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, post, put, web};
use uuid::Uuid;

use super::{created, list_response, upsert};
use crate::db::ProgressCrud;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatedResponse, PageLimits, PageParams, Progress, ProgressCreate, ProgressFilter,
    ProgressPatch, ProgressUpdate,
};

/// Record a progress sample.
#[utoipa::path(
    post,
    path = "/api/v2/progress",
    tag = "Progress",
    request_body = ProgressCreate,
    responses(
        (status = 201, description = "Created; Location points at the new row", body = CreatedResponse),
        (status = 404, description = "Test run or test does not exist", body = ErrorResponse),
        (status = 409, description = "Identifier already in use", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[post("/progress")]
pub async fn create_progress(
    req: HttpRequest,
    crud: ProgressCrud,
    body: web::Json<ProgressCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    let id = crud.create(payload).await?;
    Ok(created(&req, id))
}

/// Replace a progress sample, creating it if the id is unused.
#[utoipa::path(
    put,
    path = "/api/v2/progress/{id}",
    tag = "Progress",
    params(
        ("id" = Uuid, Path, description = "Progress UUID")
    ),
    request_body = ProgressUpdate,
    responses(
        (status = 204, description = "Updated"),
        (status = 201, description = "Created with the given id", body = CreatedResponse),
        (status = 409, description = "Create conflicted or a parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[put("/progress/{id}")]
pub async fn put_progress(
    req: HttpRequest,
    crud: ProgressCrud,
    path: web::Path<Uuid>,
    body: web::Json<ProgressUpdate>,
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
    path = "/api/v2/progress/{id}",
    tag = "Progress",
    params(
        ("id" = Uuid, Path, description = "Progress UUID")
    ),
    request_body = ProgressPatch,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not found, or a referenced parent does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[patch("/progress/{id}")]
pub async fn patch_progress(
    crud: ProgressCrud,
    path: web::Path<Uuid>,
    body: web::Json<ProgressPatch>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    crud.update(path.into_inner(), payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v2/progress/{id}",
    tag = "Progress",
    params(
        ("id" = Uuid, Path, description = "Progress UUID")
    ),
    responses(
        (status = 200, description = "Progress", body = Progress),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
#[get("/progress/{id}")]
pub async fn get_progress(
    crud: ProgressCrud,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let progress = crud.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(progress))
}

/// List progress samples, newest first.
#[utoipa::path(
    get,
    path = "/api/v2/progress",
    tag = "Progress",
    params(
        ("test_run_id" = Option<Uuid>, Query, description = "Filter by test run"),
        ("test_id" = Option<Uuid>, Query, description = "Filter by test"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Rows per page (default 100, clamped to the server maximum)")
    ),
    responses(
        (status = 200, description = "One page of results", body = [Progress],
            headers(("X-Total-Count" = u64, description = "Rows matching the filters"))),
        (status = 422, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/progress")]
pub async fn list_progress_samples(
    crud: ProgressCrud,
    filter: web::Query<ProgressFilter>,
    paging: web::Query<PageParams>,
    limits: web::Data<PageLimits>,
) -> AppResult<HttpResponse> {
    let page = paging.resolve(*limits.get_ref())?;
    let collection = crud.get_all(&filter, page).await?;
    Ok(list_response(collection))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_progress)
        .service(list_progress_samples)
        .service(get_progress)
        .service(put_progress)
        .service(patch_progress);
}
