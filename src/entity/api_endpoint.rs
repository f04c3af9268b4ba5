//! API endpoint entity, one row per (path, method) of a spec.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "api_endpoints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub spec_id: Uuid,
    pub method: String,
    pub path: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Position within the spec, preserving document order.
    pub sequence: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::api_spec::Entity",
        from = "Column::SpecId",
        to = "super::api_spec::Column::Id",
        on_delete = "Cascade"
    )]
    Spec,
}

impl Related<super::api_spec::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spec.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
