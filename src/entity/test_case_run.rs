//! Test case run entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "test_case_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub suite_run_id: Uuid,
    pub test_name: String,
    /// passed | failed | skipped
    pub status: String,
    pub duration_ms: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    /// Position within the suite, preserving document order.
    pub sequence: i32,
    pub timestamp: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::test_suite_run::Entity",
        from = "Column::SuiteRunId",
        to = "super::test_suite_run::Column::Id",
        on_delete = "Cascade"
    )]
    SuiteRun,
}

impl Related<super::test_suite_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SuiteRun.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
