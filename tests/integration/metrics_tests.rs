//! Metrics computed over stored runs.

use testing_hub_lib::error::AppError;
use testing_hub_lib::models::SpecFormat;
use testing_hub_lib::services::metrics;
use testing_hub_lib::services::{ingest_junit_report_at, ingest_openapi_spec_at};
use uuid::Uuid;

use super::helpers::*;

#[actix_rt::test]
async fn test_summary_on_empty_database() {
    let db = create_test_db().await;
    let now = at(2026, 10, 15, 0);

    let summary = metrics::summary_metrics_at(&db.pool, 30, now).await.unwrap();
    assert_eq!(summary.total_tests_executed, 0);
    assert_eq!(summary.total_test_runs, 0);
    assert_eq!(summary.pass_rate, "0.00%");
    assert_eq!(summary.failure_rate, "0.00%");
    assert_eq!(summary.flaky_rate, "0.00%");
    assert_eq!(summary.timestamp, now);
}

#[actix_rt::test]
async fn test_summary_sums_suites_inside_window() {
    let db = create_test_db().await;
    let now = at(2026, 10, 15, 0);

    ingest_junit_report_at(&db.pool, MIXED_SUITE_XML, at(2026, 10, 14, 8))
        .await
        .unwrap();
    ingest_junit_report_at(&db.pool, TWO_SUITES_XML, at(2026, 10, 10, 8))
        .await
        .unwrap();
    // Outside a 30-day window.
    ingest_junit_report_at(&db.pool, TWO_SUITES_XML, at(2026, 8, 1, 8))
        .await
        .unwrap();

    let summary = metrics::summary_metrics_at(&db.pool, 30, now).await.unwrap();
    assert_eq!(summary.total_run_suites, 3);
    assert_eq!(summary.total_tests_executed, 6);
    assert_eq!(summary.total_passed, 4);
    assert_eq!(summary.total_failed, 1);
    assert_eq!(summary.pass_rate, "66.67%");
    assert_eq!(summary.failure_rate, "16.67%");

    let week = metrics::summary_metrics_at(&db.pool, 2, now).await.unwrap();
    assert_eq!(week.total_run_suites, 1);
    assert_eq!(week.pass_rate, "33.33%");
}

#[actix_rt::test]
async fn test_negative_window_is_rejected() {
    let db = create_test_db().await;

    let result = metrics::summary_metrics_at(&db.pool, -1, at(2026, 10, 15, 0)).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[actix_rt::test]
async fn test_flaky_rate_across_uploads() {
    let db = create_test_db().await;

    let first = format!(
        "<testsuites>{}{}</testsuites>",
        single_case_xml("A", "Checkout", "paysByCard", false),
        single_case_xml("B", "Checkout", "paysByVoucher", false),
    );
    let second = format!(
        "<testsuites>{}{}</testsuites>",
        single_case_xml("A", "Checkout", "paysByCard", true),
        single_case_xml("B", "Checkout", "paysByVoucher", false),
    );
    ingest_junit_report_at(&db.pool, &first, at(2026, 10, 14, 8))
        .await
        .unwrap();
    ingest_junit_report_at(&db.pool, &second, at(2026, 10, 14, 9))
        .await
        .unwrap();

    let summary = metrics::summary_metrics_at(&db.pool, 30, at(2026, 10, 15, 0))
        .await
        .unwrap();
    assert_eq!(summary.flaky_rate, "50.00%");
}

#[actix_rt::test]
async fn test_api_coverage_matches_signatures_in_test_names() {
    let db = create_test_db().await;
    let now = at(2026, 10, 14, 8);

    let spec = ingest_openapi_spec_at(&db.pool, USERS_SPEC_YAML, SpecFormat::Yaml, now)
        .await
        .unwrap();
    let xml = single_case_xml("Api", "ApiTests", "GET /users returns 200", false);
    ingest_junit_report_at(&db.pool, &xml, now).await.unwrap();

    let coverage = metrics::api_coverage(&db.pool, spec.spec.id).await.unwrap();
    assert_eq!(coverage.total_endpoints, 2);
    assert_eq!(coverage.tested_endpoints, 1);
    assert_eq!(coverage.coverage, "50.00%");
    assert!((coverage.coverage_decimal - 0.5).abs() < f64::EPSILON);
}

#[actix_rt::test]
async fn test_api_coverage_of_unknown_spec_is_zero() {
    let db = create_test_db().await;
    let spec_id = Uuid::now_v7();

    let coverage = metrics::api_coverage(&db.pool, spec_id).await.unwrap();
    assert_eq!(coverage.spec_id, spec_id);
    assert_eq!(coverage.total_endpoints, 0);
    assert_eq!(coverage.coverage, "0.00%");
}

#[actix_rt::test]
async fn test_trend_buckets_by_day_within_period() {
    let db = create_test_db().await;
    let now = at(2026, 10, 15, 0);

    ingest_junit_report_at(&db.pool, TWO_SUITES_XML, at(2026, 10, 10, 8))
        .await
        .unwrap();
    ingest_junit_report_at(&db.pool, MIXED_SUITE_XML, at(2026, 10, 12, 8))
        .await
        .unwrap();
    ingest_junit_report_at(&db.pool, MIXED_SUITE_XML, at(2026, 9, 1, 8))
        .await
        .unwrap();

    let week = metrics::trend_at(&db.pool, "passRate", "7d", now)
        .await
        .unwrap();
    assert_eq!(week.data_points, 2);
    assert_eq!(week.trend.get("2026-10-10"), Some(&1.0));
    assert_eq!(week.trend.get("2026-10-12"), Some(&(1.0 / 3.0)));

    let quarter = metrics::trend_at(&db.pool, "failureRate", "90d", now)
        .await
        .unwrap();
    assert_eq!(quarter.data_points, 3);
    assert_eq!(quarter.trend.get("2026-10-10"), Some(&0.0));

    let unknown = metrics::trend_at(&db.pool, "flakyRate", "7d", now)
        .await
        .unwrap();
    assert_eq!(unknown.data_points, 2);
    assert!(unknown.trend.values().all(|v| *v == 0.0));
}
