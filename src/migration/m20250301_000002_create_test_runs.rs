//! Create test_runs table.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_projects::Project;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestRun::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestRun::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestRun::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(TestRun::Name).string_len(256).null())
                    .col(ColumnDef::new(TestRun::Variant).json_binary().not_null())
                    .col(ColumnDef::new(TestRun::Config).json_binary().not_null())
                    .col(ColumnDef::new(TestRun::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(TestRun::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestRun::EndTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_runs_project_id")
                            .from(TestRun::Table, TestRun::ProjectId)
                            .to(Project::Table, Project::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_runs_project_id_start_time")
                    .table(TestRun::Table)
                    .col(TestRun::ProjectId)
                    .col(TestRun::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestRun::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestRun {
    #[sea_orm(iden = "test_runs")]
    Table,
    Id,
    ProjectId,
    Name,
    Variant,
    Config,
    Status,
    StartTime,
    EndTime,
}
