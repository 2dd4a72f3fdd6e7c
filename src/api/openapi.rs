//! OpenAPI documentation configuration.

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agnostic Server",
        version = "0.2.0",
        description = "Records projects, test runs, tests, metrics, progress and logs, with paginated CRUD over HTTP"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Projects
        api::projects::create_project,
        api::projects::put_project,
        api::projects::patch_project,
        api::projects::get_project,
        api::projects::list_projects,
        // Test runs
        api::test_runs::create_test_run,
        api::test_runs::put_test_run,
        api::test_runs::patch_test_run,
        api::test_runs::get_test_run,
        api::test_runs::list_test_runs,
        // Tests
        api::tests::create_test,
        api::tests::put_test,
        api::tests::patch_test,
        api::tests::get_test,
        api::tests::list_tests,
        // Metrics
        api::metrics::create_metric,
        api::metrics::put_metric,
        api::metrics::patch_metric,
        api::metrics::get_metric,
        api::metrics::list_metrics,
        // Metrics over time
        api::metrics_ot::create_metric_ot,
        api::metrics_ot::put_metric_ot,
        api::metrics_ot::patch_metric_ot,
        api::metrics_ot::get_metric_ot,
        api::metrics_ot::list_metrics_ot,
        // Progress
        api::progress::create_progress,
        api::progress::put_progress,
        api::progress::patch_progress,
        api::progress::get_progress,
        api::progress::list_progress_samples,
        // Logs
        api::logs::create_log,
        api::logs::put_log,
        api::logs::patch_log,
        api::logs::get_log,
        api::logs::list_logs,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::CreatedResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Projects
            models::Project,
            models::ProjectCreate,
            models::ProjectUpdate,
            models::ProjectPatch,
            // Test runs
            models::TestRun,
            models::TestRunCreate,
            models::TestRunUpdate,
            models::TestRunPatch,
            // Tests
            models::Test,
            models::TestCreate,
            models::TestUpdate,
            models::TestPatch,
            // Metrics
            models::Metric,
            models::MetricCreate,
            models::MetricUpdate,
            models::MetricPatch,
            // Metrics over time
            models::MetricOverTime,
            models::MetricOverTimeCreate,
            models::MetricOverTimeUpdate,
            models::MetricOverTimePatch,
            // Progress
            models::Progress,
            models::ProgressCreate,
            models::ProgressUpdate,
            models::ProgressPatch,
            // Logs
            models::Log,
            models::LogCreate,
            models::LogUpdate,
            models::LogPatch,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Projects", description = "Projects grouping test runs"),
        (name = "Test runs", description = "Executions of a project's tests"),
        (name = "Tests", description = "Individual tests within a run"),
        (name = "Metrics", description = "Single-valued measurements"),
        (name = "Metrics over time", description = "Named samples of several values"),
        (name = "Progress", description = "Completion percentage samples"),
        (name = "Logs", description = "Log lines captured during a run")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
