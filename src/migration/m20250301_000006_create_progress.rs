//! Create progress table.

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
                    .table(Progress::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Progress::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Progress::TestRunId).uuid().not_null())
                    .col(ColumnDef::new(Progress::TestId).uuid().null())
                    .col(ColumnDef::new(Progress::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Progress::Progress).double().not_null())
                    .col(
                        ColumnDef::new(Progress::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_test_run_id")
                            .from(Progress::Table, Progress::TestRunId)
                            .to(TestRun::Table, TestRun::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_test_id")
                            .from(Progress::Table, Progress::TestId)
                            .to(Test::Table, Test::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_progress_test_run_id_timestamp")
                    .table(Progress::Table)
                    .col(Progress::TestRunId)
                    .col(Progress::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Progress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Progress {
    #[sea_orm(iden = "progress")]
    Table,
    Id,
    TestRunId,
    TestId,
    Name,
    Progress,
    Timestamp,
}
