//! Project endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, post, put, web};
use uuid::Uuid;

use super::{created, list_response, upsert};
use crate::db::ProjectCrud;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreatedResponse, PageLimits, PageParams, Project, ProjectCreate, ProjectFilter, ProjectPatch,
    ProjectUpdate,
};

/// Register a project.
#[utoipa::path(
    post,
    path = "/api/v2/projects",
    tag = "Projects",
    request_body = ProjectCreate,
    responses(
        (status = 201, description = "Created; Location points at the new row", body = CreatedResponse),
        (status = 409, description = "Identifier already in use", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[post("/projects")]
pub async fn create_project(
    req: HttpRequest,
    crud: ProjectCrud,
    body: web::Json<ProjectCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    let id = crud.create(payload).await?;
    Ok(created(&req, id))
}

/// Replace a project, creating it if the id is unused.
#[utoipa::path(
    put,
    path = "/api/v2/projects/{id}",
    tag = "Projects",
    params(
        ("id" = Uuid, Path, description = "Project UUID")
    ),
    request_body = ProjectUpdate,
    responses(
        (status = 204, description = "Updated"),
        (status = 201, description = "Created with the given id", body = CreatedResponse),
        (status = 409, description = "Create conflicted", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[put("/projects/{id}")]
pub async fn put_project(
    req: HttpRequest,
    crud: ProjectCrud,
    path: web::Path<Uuid>,
    body: web::Json<ProjectUpdate>,
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
    path = "/api/v2/projects/{id}",
    tag = "Projects",
    params(
        ("id" = Uuid, Path, description = "Project UUID")
    ),
    request_body = ProjectPatch,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
#[patch("/projects/{id}")]
pub async fn patch_project(
    crud: ProjectCrud,
    path: web::Path<Uuid>,
    body: web::Json<ProjectPatch>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner().validate()?;
    crud.update(path.into_inner(), payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v2/projects/{id}",
    tag = "Projects",
    params(
        ("id" = Uuid, Path, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
#[get("/projects/{id}")]
pub async fn get_project(
    crud: ProjectCrud,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let project = crud.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// List projects by name.
#[utoipa::path(
    get,
    path = "/api/v2/projects",
    tag = "Projects",
    params(
        ("name" = Option<String>, Query, description = "Filter by exact name"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Rows per page (default 100, clamped to the server maximum)")
    ),
    responses(
        (status = 200, description = "One page of results", body = [Project],
            headers(("X-Total-Count" = u64, description = "Rows matching the filters"))),
        (status = 422, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/projects")]
pub async fn list_projects(
    crud: ProjectCrud,
    filter: web::Query<ProjectFilter>,
    paging: web::Query<PageParams>,
    limits: web::Data<PageLimits>,
) -> AppResult<HttpResponse> {
    let page = paging.resolve(*limits.get_ref())?;
    let collection = crud.get_all(&filter, page).await?;
    Ok(list_response(collection))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_project)
        .service(list_projects)
        .service(get_project)
        .service(put_project)
        .service(patch_project);
}
