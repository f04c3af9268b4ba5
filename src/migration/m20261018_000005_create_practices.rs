//! Create practices table for the knowledge base articles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Practices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Practices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Practices::Slug)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Practices::Title).string().not_null())
                    .col(ColumnDef::new(Practices::Content).text().not_null())
                    .col(ColumnDef::new(Practices::Tags).string().not_null())
                    .col(
                        ColumnDef::new(Practices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Practices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Practices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Practices {
    Table,
    Id,
    Slug,
    Title,
    Content,
    Tags,
    CreatedAt,
    UpdatedAt,
}
