//! Test suite run entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "test_suite_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub suite_name: String,
    /// passed | failed | mixed
    pub status: String,
    pub total_tests: i32,
    pub passed_tests: i32,
    pub failed_tests: i32,
    pub skipped_tests: i32,
    pub duration_ms: i64,
    pub timestamp: DateTimeUtc,
    pub upload_source_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::test_case_run::Entity")]
    TestCaseRuns,
}

impl Related<super::test_case_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCaseRuns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
