//! Create logs table.

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
                    .table(Log::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Log::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Log::TestRunId).uuid().not_null())
                    .col(ColumnDef::new(Log::TestId).uuid().null())
                    .col(
                        ColumnDef::new(Log::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Log::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Log::Level).string_len(32).not_null())
                    .col(ColumnDef::new(Log::Message).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_test_run_id")
                            .from(Log::Table, Log::TestRunId)
                            .to(TestRun::Table, TestRun::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_test_id")
                            .from(Log::Table, Log::TestId)
                            .to(Test::Table, Test::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_logs_test_run_id_timestamp")
                    .table(Log::Table)
                    .col(Log::TestRunId)
                    .col(Log::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_logs_test_id")
                    .table(Log::Table)
                    .col(Log::TestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Log::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Log {
    #[sea_orm(iden = "logs")]
    Table,
    Id,
    TestRunId,
    TestId,
    Timestamp,
    Name,
    Level,
    Message,
}
