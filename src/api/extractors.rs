//! Request-scoped CRUD objects.
//!
//! Each CRUD struct can be taken directly as a handler argument; it is bound to
//! the shared pool for the duration of the request and dropped with it.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use std::future::{Ready, ready};

use crate::db::{
    DbPool, LogCrud, MetricCrud, MetricOverTimeCrud, ProgressCrud, ProjectCrud, TestCrud,
    TestRunCrud,
};
use crate::error::{AppError, AppResult};

fn pool(req: &HttpRequest) -> AppResult<&web::Data<DbPool>> {
    req.app_data::<web::Data<DbPool>>().ok_or_else(|| {
        tracing::error!("DbPool is not registered as app data");
        AppError::Database("Database pool is not configured".to_string())
    })
}

macro_rules! crud_from_request {
    ($($crud:ident),+ $(,)?) => {
        $(
            impl FromRequest for $crud {
                type Error = AppError;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    ready(pool(req).map(|pool| $crud::new(pool.connection().clone())))
                }
            }
        )+
    };
}

crud_from_request!(
    ProjectCrud,
    TestRunCrud,
    TestCrud,
    MetricCrud,
    MetricOverTimeCrud,
    ProgressCrud,
    LogCrud,
);
