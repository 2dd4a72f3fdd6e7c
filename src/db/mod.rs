//! Database access using SeaORM.
//!
//! `DbPool` owns the connection pool. Each entity has a CRUD struct bound to a
//! connection handle for the lifetime of one request; every mutating call runs
//! in its own transaction and commits before returning.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Config, DatabaseConfig};
use crate::error::{AppError, AppResult};
use crate::migration::{Migrator, MigratorTrait};
use crate::models::{JsonObject, Labels, MetricValues};

pub mod logs;
pub mod metrics;
pub mod metrics_ot;
pub mod progress;
pub mod projects;
pub mod test_runs;

pub use logs::LogCrud;
pub use metrics::MetricCrud;
pub use metrics_ot::MetricOverTimeCrud;
pub use progress::ProgressCrud;
pub use projects::ProjectCrud;
pub use test_runs::TestRunCrud;
pub use tests::TestCrud;

/// Shared connection pool, registered as actix app data.
#[derive(Clone, Debug)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect using the application config.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(&config.database).await
    }

    pub async fn connect(settings: &DatabaseConfig) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(settings.url.clone());
        opts.max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(
            "Database pool ready (max_connections={})",
            settings.max_connections
        );

        Ok(Self { conn })
    }

    /// Apply pending embedded migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;

        info!("Database migrations applied");
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Round-trip to the database; used by the readiness probe.
    pub async fn ping(&self) -> AppResult<()> {
        self.conn.ping().await.map_err(|e| {
            warn!("Database ping failed: {}", e);
            AppError::Database(e.to_string())
        })
    }
}

/// Failures surfaced by the CRUD structs.
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    /// No row has the requested identifier
    #[error("{0}")]
    NotFound(String),

    /// Identifier collision
    #[error("{0}")]
    Duplicate(String),

    /// A referenced parent row does not exist
    #[error("{0}")]
    ForeignKey(String),

    /// Any other store failure
    #[error("Database error: {0}")]
    Database(String),
}

pub type CrudResult<T> = Result<T, CrudError>;

impl From<DbErr> for CrudError {
    fn from(err: DbErr) -> Self {
        CrudError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for CrudError {
    fn from(err: serde_json::Error) -> Self {
        CrudError::Database(format!("Stored JSON does not match schema: {}", err))
    }
}

pub(crate) fn not_found(entity: &str, id: Uuid) -> CrudError {
    CrudError::NotFound(format!("{} {} not found", entity, id))
}

/// Classify a failed write by the driver's constraint category.
///
/// Foreign-key violations are `ForeignKey`; every other integrity violation is
/// `Duplicate`. Errors the driver does not categorise stay `Database`.
pub(crate) fn write_error(entity: &str, id: Uuid, err: DbErr) -> CrudError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            warn!("{} {} references a missing parent: {}", entity, id, detail);
            CrudError::ForeignKey(format!("{} {} references a parent that does not exist", entity, id))
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CrudError::Duplicate(format!("{} {} already exists", entity, id))
        }
        Some(other) => {
            warn!("{} {} violates an integrity constraint: {:?}", entity, id, other);
            CrudError::Duplicate(format!("{} {} conflicts with an existing row", entity, id))
        }
        None => CrudError::from(err),
    }
}

pub(crate) fn labels_to_json(labels: Labels) -> serde_json::Value {
    serde_json::Value::Object(
        labels
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect(),
    )
}

pub(crate) fn object_to_json(object: JsonObject) -> serde_json::Value {
    serde_json::Value::Object(object)
}

pub(crate) fn values_to_json(values: MetricValues) -> serde_json::Value {
    serde_json::Value::Object(
        values
            .into_iter()
            .map(|(k, v)| (k, v.map_or(serde_json::Value::Null, serde_json::Value::from)))
            .collect(),
    )
}
