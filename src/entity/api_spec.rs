//! Uploaded OpenAPI document entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "api_specs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub version: String,
    #[sea_orm(column_type = "Text")]
    pub spec_content: String,
    /// yaml | json
    pub spec_format: String,
    pub upload_source_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::api_endpoint::Entity")]
    Endpoints,
}

impl Related<super::api_endpoint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Endpoints.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
