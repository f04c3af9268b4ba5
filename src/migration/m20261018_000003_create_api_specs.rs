//! Create api_specs table.
//!
//! The uploaded document text is stored verbatim alongside the parsed title
//! and version.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiSpecs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ApiSpecs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ApiSpecs::Name).string().not_null())
                    .col(ColumnDef::new(ApiSpecs::Title).string().not_null())
                    .col(ColumnDef::new(ApiSpecs::Version).string_len(64).not_null())
                    .col(ColumnDef::new(ApiSpecs::SpecContent).text().not_null())
                    .col(ColumnDef::new(ApiSpecs::SpecFormat).string_len(8).not_null())
                    .col(ColumnDef::new(ApiSpecs::UploadSourceId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(ApiSpecs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApiSpecs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiSpecs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ApiSpecs {
    Table,
    Id,
    Name,
    Title,
    Version,
    SpecContent,
    SpecFormat,
    UploadSourceId,
    CreatedAt,
    UpdatedAt,
}
