//! Create metrics_ot table.

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
                    .table(MetricOverTime::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetricOverTime::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MetricOverTime::TestRunId).uuid().not_null())
                    .col(ColumnDef::new(MetricOverTime::TestId).uuid().null())
                    .col(
                        ColumnDef::new(MetricOverTime::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetricOverTime::Name)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetricOverTime::Values)
                            .json_binary()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_ot_test_run_id")
                            .from(MetricOverTime::Table, MetricOverTime::TestRunId)
                            .to(TestRun::Table, TestRun::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_ot_test_id")
                            .from(MetricOverTime::Table, MetricOverTime::TestId)
                            .to(Test::Table, Test::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metrics_ot_test_run_id_timestamp")
                    .table(MetricOverTime::Table)
                    .col(MetricOverTime::TestRunId)
                    .col(MetricOverTime::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metrics_ot_test_id")
                    .table(MetricOverTime::Table)
                    .col(MetricOverTime::TestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MetricOverTime::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MetricOverTime {
    #[sea_orm(iden = "metrics_ot")]
    Table,
    Id,
    TestRunId,
    TestId,
    Timestamp,
    Name,
    Values,
}
