//! HTTP endpoints.
//!
//! Every entity exposes the same five routes: create, put (update or create),
//! patch, get one and list. All routes are mounted under `/api/v2`.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::future::Future;
use uuid::Uuid;

use crate::db::{CrudError, CrudResult};
use crate::error::{AppError, AppResult};
use crate::models::{CreatedResponse, CrudCollection};

pub mod extractors;
pub mod health;
pub mod logs;
pub mod metrics;
pub mod metrics_ot;
pub mod openapi;
pub mod progress;
pub mod projects;
pub mod test_runs;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Prefix shared by every route.
pub const API_PREFIX: &str = "/api/v2";

/// Header carrying the size of the full filtered set on list responses.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Register all entity routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(projects::configure_routes)
        .configure(test_runs::configure_routes)
        .configure(tests::configure_routes)
        .configure(metrics::configure_routes)
        .configure(metrics_ot::configure_routes)
        .configure(progress::configure_routes)
        .configure(logs::configure_routes);
}

/// JSON body config: payloads that fail to deserialize are validation errors,
/// a body that is not declared as JSON is invalid input.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| match err {
        JsonPayloadError::Deserialize(e) => AppError::Validation(e.to_string()).into(),
        JsonPayloadError::ContentType => {
            AppError::InvalidInput("Content-Type must be application/json".to_string()).into()
        }
        other => other.into(),
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| match err {
        QueryPayloadError::Deserialize(e) => AppError::Validation(e.to_string()).into(),
        other => other.into(),
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| match err {
        PathError::Deserialize(e) => AppError::Validation(e.to_string()).into(),
        other => other.into(),
    })
}

/// `201 Created` pointing at the new row under the collection path.
pub fn created(req: &HttpRequest, id: Uuid) -> HttpResponse {
    let location = format!("{}/{}", req.path().trim_end_matches('/'), id);
    HttpResponse::Created()
        .insert_header((LOCATION, location))
        .json(CreatedResponse { id })
}

/// `200 OK` with the page as a JSON array and the total in a header.
pub fn list_response<T: Serialize>(collection: CrudCollection<T>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, collection.count.to_string()))
        .json(collection.items)
}

/// Result of a PUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The row existed and was replaced
    Updated,
    /// No row had the id, so one was created with it
    Created(Uuid),
}

impl PutOutcome {
    /// `204` for an update, `201` + `Location` of the request path for a create.
    pub fn into_response(self, req: &HttpRequest) -> HttpResponse {
        match self {
            PutOutcome::Updated => HttpResponse::NoContent().finish(),
            PutOutcome::Created(id) => HttpResponse::Created()
                .insert_header((LOCATION, req.path().to_string()))
                .json(CreatedResponse { id }),
        }
    }
}

/// PUT state machine: try the update; if the row is missing, create it.
///
/// `make_create` runs only on the fallback path, so a body that lacks the
/// parent keys a create needs still works for rows that already exist.
/// Both a failed fallback create and a bad parent key on update are conflicts.
pub async fn upsert<U, C, F>(update: U, make_create: C) -> AppResult<PutOutcome>
where
    U: Future<Output = CrudResult<Uuid>>,
    C: FnOnce() -> AppResult<F>,
    F: Future<Output = CrudResult<Uuid>>,
{
    match update.await {
        Ok(_) => Ok(PutOutcome::Updated),
        Err(CrudError::NotFound(_)) => match make_create()?.await {
            Ok(id) => Ok(PutOutcome::Created(id)),
            Err(CrudError::Duplicate(msg) | CrudError::ForeignKey(msg)) => {
                Err(AppError::Conflict(msg))
            }
            Err(err) => Err(err.into()),
        },
        Err(CrudError::ForeignKey(msg)) => Err(AppError::Conflict(msg)),
        Err(err) => Err(err.into()),
    }
}
