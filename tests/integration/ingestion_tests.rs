//! JUnit and OpenAPI ingestion against a real database.

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use testing_hub_lib::entity::{api_spec, test_suite_run};
use testing_hub_lib::error::AppError;
use testing_hub_lib::models::{CaseStatus, HttpMethod, SpecFormat, SuiteStatus};
use testing_hub_lib::services::{ingest_junit_report_at, ingest_openapi_spec_at};

use super::helpers::*;

#[actix_rt::test]
async fn test_mixed_suite_is_persisted_with_declared_counts() {
    let db = create_test_db().await;
    let now = at(2026, 10, 1, 9);

    let report = ingest_junit_report_at(&db.pool, MIXED_SUITE_XML, now)
        .await
        .unwrap();
    assert_eq!(report.suites.len(), 1);

    let suite = db
        .pool
        .get_suite_run_by_id(report.suites[0].id)
        .await
        .unwrap()
        .expect("suite should be stored");
    assert_eq!(suite.suite_name, "S");
    assert_eq!(suite.total_tests, 3);
    assert_eq!(suite.passed_tests, 1);
    assert_eq!(suite.failed_tests, 1);
    assert_eq!(suite.skipped_tests, 1);
    assert_eq!(suite.status, SuiteStatus::Failed);
    assert_eq!(suite.duration_ms, 1500);
    assert_eq!(suite.timestamp, now);

    let cases = db.pool.find_cases_by_suite_id(suite.id).await.unwrap();
    let outcomes: Vec<_> = cases
        .iter()
        .map(|c| (c.test_name.as_str(), c.status))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("com.example.UserTest.createsUser", CaseStatus::Passed),
            ("com.example.UserTest.deletesUser", CaseStatus::Failed),
            ("com.example.UserTest.archivesUser", CaseStatus::Skipped),
        ]
    );
    assert_eq!(cases[1].error_message.as_deref(), Some("expected 204 but was 500"));
    assert!(cases.iter().all(|c| c.suite_run_id == suite.id));
}

#[actix_rt::test]
async fn test_suites_of_one_upload_share_batch_id_and_timestamp() {
    let db = create_test_db().await;
    let now = at(2026, 10, 2, 14);

    let report = ingest_junit_report_at(&db.pool, TWO_SUITES_XML, now)
        .await
        .unwrap();
    assert_eq!(report.suites.len(), 2);
    assert!(
        report
            .suites
            .iter()
            .all(|s| s.upload_source_id == report.upload_source_id && s.timestamp == now)
    );
    assert!(report.suites.iter().all(|s| s.status == SuiteStatus::Passed));

    let other = ingest_junit_report_at(&db.pool, TWO_SUITES_XML, now)
        .await
        .unwrap();
    assert_ne!(other.upload_source_id, report.upload_source_id);
}

#[actix_rt::test]
async fn test_malformed_report_stores_nothing() {
    let db = create_test_db().await;

    let err = ingest_junit_report_at(&db.pool, "<testsuite name=\"x\"", at(2026, 10, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));

    let count = test_suite_run::Entity::find()
        .count(db.pool.connection())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_rt::test]
async fn test_failed_case_insert_rolls_back_suite() {
    let db = create_test_db().await;
    db.pool
        .connection()
        .execute_unprepared("DROP TABLE test_case_runs")
        .await
        .unwrap();

    let result = ingest_junit_report_at(&db.pool, MIXED_SUITE_XML, at(2026, 10, 1, 0)).await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let count = test_suite_run::Entity::find()
        .count(db.pool.connection())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_rt::test]
async fn test_openapi_get_and_post_share_spec() {
    let db = create_test_db().await;

    let ingested = ingest_openapi_spec_at(
        &db.pool,
        USERS_SPEC_YAML,
        SpecFormat::Yaml,
        at(2026, 10, 1, 0),
    )
    .await
    .unwrap();
    assert_eq!(ingested.spec.title, "Users API");
    assert_eq!(ingested.spec.version, "1.2.0");

    let endpoints = db
        .pool
        .find_endpoints_by_spec_id(ingested.spec.id)
        .await
        .unwrap();
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0].method, HttpMethod::Get);
    assert_eq!(endpoints[1].method, HttpMethod::Post);
    assert!(endpoints.iter().all(|e| e.spec_id == ingested.spec.id));
    assert!(endpoints.iter().all(|e| e.path == "/users"));
    assert_eq!(endpoints[0].summary.as_deref(), Some("List users"));

    let stored = db
        .pool
        .get_api_spec_by_id(ingested.spec.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.spec_content, USERS_SPEC_YAML);
    assert_eq!(stored.spec_format, SpecFormat::Yaml);
}

#[actix_rt::test]
async fn test_unsupported_openapi_version_stores_nothing() {
    let db = create_test_db().await;
    let swagger = r#"{"swagger": "2.0", "info": {"title": "Old", "version": "1"}, "paths": {}}"#;

    let result =
        ingest_openapi_spec_at(&db.pool, swagger, SpecFormat::Json, at(2026, 10, 1, 0)).await;
    assert!(matches!(result, Err(AppError::Parse(_))));

    let count = api_spec::Entity::find()
        .count(db.pool.connection())
        .await
        .unwrap();
    assert_eq!(count, 0);
}
