//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_test_suite_runs;
mod m20261018_000002_create_test_case_runs;
mod m20261018_000003_create_api_specs;
mod m20261018_000004_create_api_endpoints;
mod m20261018_000005_create_practices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_test_suite_runs::Migration),
            Box::new(m20261018_000002_create_test_case_runs::Migration),
            Box::new(m20261018_000003_create_api_specs::Migration),
            Box::new(m20261018_000004_create_api_endpoints::Migration),
            Box::new(m20261018_000005_create_practices::Migration),
        ]
    }
}
