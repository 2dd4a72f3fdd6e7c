//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_projects;
mod m20250301_000002_create_test_runs;
mod m20250301_000004_create_metrics;
mod m20250301_000005_create_metrics_ot;
mod m20250301_000006_create_progress;
mod m20250301_000007_create_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_projects::Migration),
            Box::new(m20250301_000002_create_test_runs::Migration),
            Box::new(m20250301_000003_create_tests::Migration),
            Box::new(m20250301_000004_create_metrics::Migration),
            Box::new(m20250301_000005_create_metrics_ot::Migration),
            Box::new(m20250301_000006_create_progress::Migration),
            Box::new(m20250301_000007_create_logs::Migration),
        ]
    }
}
