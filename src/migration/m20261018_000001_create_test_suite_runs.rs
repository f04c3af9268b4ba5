//! Create test_suite_runs table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestSuiteRuns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestSuiteRuns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestSuiteRuns::SuiteName).string().not_null())
                    .col(ColumnDef::new(TestSuiteRuns::Status).string_len(16).not_null())
                    .col(ColumnDef::new(TestSuiteRuns::TotalTests).integer().not_null())
                    .col(ColumnDef::new(TestSuiteRuns::PassedTests).integer().not_null())
                    .col(ColumnDef::new(TestSuiteRuns::FailedTests).integer().not_null())
                    .col(ColumnDef::new(TestSuiteRuns::SkippedTests).integer().not_null())
                    .col(ColumnDef::new(TestSuiteRuns::DurationMs).big_integer().not_null())
                    .col(
                        ColumnDef::new(TestSuiteRuns::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteRuns::UploadSourceId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteRuns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteRuns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Window queries for summary and trend metrics
        manager
            .create_index(
                Index::create()
                    .name("idx_test_suite_runs_timestamp")
                    .table(TestSuiteRuns::Table)
                    .col(TestSuiteRuns::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_suite_runs_upload_source_id")
                    .table(TestSuiteRuns::Table)
                    .col(TestSuiteRuns::UploadSourceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestSuiteRuns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestSuiteRuns {
    Table,
    Id,
    SuiteName,
    Status,
    TotalTests,
    PassedTests,
    FailedTests,
    SkippedTests,
    DurationMs,
    Timestamp,
    UploadSourceId,
    CreatedAt,
    UpdatedAt,
}
