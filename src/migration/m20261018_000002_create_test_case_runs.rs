//! Create test_case_runs table.

use sea_orm_migration::prelude::*;

use super::m20261018_000001_create_test_suite_runs::TestSuiteRuns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestCaseRuns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestCaseRuns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestCaseRuns::SuiteRunId).uuid().not_null())
                    .col(ColumnDef::new(TestCaseRuns::TestName).text().not_null())
                    .col(ColumnDef::new(TestCaseRuns::Status).string_len(16).not_null())
                    .col(ColumnDef::new(TestCaseRuns::DurationMs).big_integer().not_null())
                    .col(ColumnDef::new(TestCaseRuns::ErrorMessage).text())
                    .col(ColumnDef::new(TestCaseRuns::Sequence).integer().not_null())
                    .col(
                        ColumnDef::new(TestCaseRuns::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCaseRuns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_case_runs_suite_run_id")
                            .from(TestCaseRuns::Table, TestCaseRuns::SuiteRunId)
                            .to(TestSuiteRuns::Table, TestSuiteRuns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_case_runs_suite_run_id")
                    .table(TestCaseRuns::Table)
                    .col(TestCaseRuns::SuiteRunId)
                    .to_owned(),
            )
            .await?;

        // Flakiness groups every recorded case by name
        manager
            .create_index(
                Index::create()
                    .name("idx_test_case_runs_test_name")
                    .table(TestCaseRuns::Table)
                    .col(TestCaseRuns::TestName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestCaseRuns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TestCaseRuns {
    Table,
    Id,
    SuiteRunId,
    TestName,
    Status,
    DurationMs,
    ErrorMessage,
    Sequence,
    Timestamp,
    CreatedAt,
}
