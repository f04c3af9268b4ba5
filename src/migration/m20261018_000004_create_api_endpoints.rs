//! Create api_endpoints table.

use sea_orm_migration::prelude::*;

use super::m20261018_000003_create_api_specs::ApiSpecs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiEndpoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApiEndpoints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ApiEndpoints::SpecId).uuid().not_null())
                    .col(ColumnDef::new(ApiEndpoints::Method).string_len(8).not_null())
                    .col(ColumnDef::new(ApiEndpoints::Path).text().not_null())
                    .col(ColumnDef::new(ApiEndpoints::Summary).text())
                    .col(ColumnDef::new(ApiEndpoints::Description).text())
                    .col(ColumnDef::new(ApiEndpoints::Sequence).integer().not_null())
                    .col(
                        ColumnDef::new(ApiEndpoints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_api_endpoints_spec_id")
                            .from(ApiEndpoints::Table, ApiEndpoints::SpecId)
                            .to(ApiSpecs::Table, ApiSpecs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_endpoints_spec_id")
                    .table(ApiEndpoints::Table)
                    .col(ApiEndpoints::SpecId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiEndpoints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ApiEndpoints {
    Table,
    Id,
    SpecId,
    Method,
    Path,
    Summary,
    Description,
    Sequence,
    CreatedAt,
}
