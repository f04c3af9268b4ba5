//! JUnit report ingestion.
//!
//! Parses a report and persists every suite and case it contains inside one
//! transaction, so an upload is either fully visible or not at all.

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::test_runs::{self, NewCaseRun, NewSuiteRun};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CaseStatus, SuiteStatus, TestSuiteRun};
use crate::parser::{junit, ParsedSuite};

/// Result of one ingestion call.
#[derive(Debug, Clone)]
pub struct IngestedReport {
    /// Batch token shared by every suite of the upload.
    pub upload_source_id: String,
    /// Persisted suites in document order.
    pub suites: Vec<TestSuiteRun>,
}

impl IngestedReport {
    pub fn suite_ids(&self) -> Vec<Uuid> {
        self.suites.iter().map(|s| s.id).collect()
    }
}

/// Ingest a JUnit XML report using the current time as the ingestion time.
pub async fn ingest_junit_report(pool: &DbPool, xml: &str) -> AppResult<IngestedReport> {
    ingest_junit_report_at(pool, xml, Utc::now()).await
}

/// Ingest a JUnit XML report, stamping every record with `now`.
pub async fn ingest_junit_report_at(
    pool: &DbPool,
    xml: &str,
    now: DateTime<Utc>,
) -> AppResult<IngestedReport> {
    let parsed = junit::parse(xml)?;
    let upload_source_id = Uuid::new_v4().to_string();

    let txn = pool
        .connection()
        .begin()
        .await
        .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

    let mut suites = Vec::with_capacity(parsed.len());
    let mut case_count = 0usize;

    for suite in parsed {
        check_declared_counts(&suite);

        let status = SuiteStatus::from_counts(suite.tests, suite.passed, suite.failures);
        let saved = test_runs::insert_suite_run(
            &txn,
            NewSuiteRun {
                suite_name: suite.name,
                status,
                total_tests: suite.tests,
                passed_tests: suite.passed,
                failed_tests: suite.failures,
                skipped_tests: suite.skipped,
                duration_ms: suite.duration_ms,
                timestamp: now,
                upload_source_id: upload_source_id.clone(),
            },
        )
        .await?;

        for (sequence, case) in suite.cases.into_iter().enumerate() {
            test_runs::insert_case_run(
                &txn,
                NewCaseRun {
                    suite_run_id: saved.id,
                    test_name: case.name,
                    status: case.status,
                    duration_ms: case.duration_ms,
                    error_message: case.error_message,
                    sequence: sequence as i32,
                    timestamp: now,
                },
            )
            .await?;
            case_count += 1;
        }

        suites.push(saved);
    }

    txn.commit()
        .await
        .map_err(|e| AppError::Database(format!("Failed to commit JUnit ingestion: {}", e)))?;

    info!(
        upload_source_id = %upload_source_id,
        suites = suites.len(),
        cases = case_count,
        "JUnit report ingested"
    );

    Ok(IngestedReport {
        upload_source_id,
        suites,
    })
}

/// Declared counts are stored as-is; a mismatch with the case elements is
/// only reported.
fn check_declared_counts(suite: &ParsedSuite) {
    let count = |status: CaseStatus| suite.cases.iter().filter(|c| c.status == status).count();
    let failed = count(CaseStatus::Failed) as i32;
    let skipped = count(CaseStatus::Skipped) as i32;
    let passed = count(CaseStatus::Passed) as i32;

    if failed != suite.failures || skipped != suite.skipped || passed != suite.passed {
        warn!(
            suite = %suite.name,
            declared_tests = suite.tests,
            declared_failures = suite.failures,
            declared_skipped = suite.skipped,
            case_passed = passed,
            case_failed = failed,
            case_skipped = skipped,
            "Suite counts disagree with its test cases"
        );
    }
}
