//! Create metrics table.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_test_runs::TestRun;
use super::m20250301_000003_create_tests::Test;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Metric::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Metric::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Metric::TestRunId).uuid().not_null())
                    .col(ColumnDef::new(Metric::TestId).uuid().null())
                    .col(ColumnDef::new(Metric::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Metric::Description).string_len(256).null())
                    .col(ColumnDef::new(Metric::Unit).string_len(32).null())
                    .col(ColumnDef::new(Metric::Value).double().null())
                    .col(
                        ColumnDef::new(Metric::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_test_run_id")
                            .from(Metric::Table, Metric::TestRunId)
                            .to(TestRun::Table, TestRun::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_test_id")
                            .from(Metric::Table, Metric::TestId)
                            .to(Test::Table, Test::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metrics_test_run_id_timestamp")
                    .table(Metric::Table)
                    .col(Metric::TestRunId)
                    .col(Metric::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metrics_test_id")
                    .table(Metric::Table)
                    .col(Metric::TestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Metric::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Metric {
    #[sea_orm(iden = "metrics")]
    Table,
    Id,
    TestRunId,
    TestId,
    Name,
    Description,
    Unit,
    Value,
    Timestamp,
}
