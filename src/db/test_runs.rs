//! Database queries for test suite runs and test case runs.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::test_case_run::{self, ActiveModel as CaseActiveModel, Entity as CaseRun};
use crate::entity::test_suite_run::{self, ActiveModel as SuiteActiveModel, Entity as SuiteRun};
use crate::error::{AppError, AppResult};
use crate::models::{CaseStatus, SuiteStatus, TestCaseRun, TestSuiteRun};

use super::DbPool;

/// Represents a suite run to be inserted.
pub struct NewSuiteRun {
    pub suite_name: String,
    pub status: SuiteStatus,
    pub total_tests: i32,
    pub passed_tests: i32,
    pub failed_tests: i32,
    pub skipped_tests: i32,
    pub duration_ms: i64,
    pub timestamp: DateTime<Utc>,
    pub upload_source_id: String,
}

/// Represents a case run to be inserted.
pub struct NewCaseRun {
    pub suite_run_id: Uuid,
    pub test_name: String,
    pub status: CaseStatus,
    pub duration_ms: i64,
    pub error_message: Option<String>,
    pub sequence: i32,
    pub timestamp: DateTime<Utc>,
}

/// Insert a suite run. Generic over the connection so it can run inside a
/// transaction.
pub async fn insert_suite_run<C: ConnectionTrait>(
    db: &C,
    suite: NewSuiteRun,
) -> AppResult<TestSuiteRun> {
    let model = SuiteActiveModel {
        id: Set(Uuid::now_v7()),
        suite_name: Set(suite.suite_name),
        status: Set(suite.status.as_str().to_string()),
        total_tests: Set(suite.total_tests),
        passed_tests: Set(suite.passed_tests),
        failed_tests: Set(suite.failed_tests),
        skipped_tests: Set(suite.skipped_tests),
        duration_ms: Set(suite.duration_ms),
        timestamp: Set(suite.timestamp),
        upload_source_id: Set(suite.upload_source_id),
        created_at: Set(suite.timestamp),
        updated_at: Set(suite.timestamp),
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert test suite run: {}", e)))?;

    model_to_suite_run(result)
}

/// Insert a case run belonging to an already inserted suite run.
pub async fn insert_case_run<C: ConnectionTrait>(
    db: &C,
    case: NewCaseRun,
) -> AppResult<TestCaseRun> {
    let model = CaseActiveModel {
        id: Set(Uuid::now_v7()),
        suite_run_id: Set(case.suite_run_id),
        test_name: Set(case.test_name),
        status: Set(case.status.as_str().to_string()),
        duration_ms: Set(case.duration_ms),
        error_message: Set(case.error_message),
        sequence: Set(case.sequence),
        timestamp: Set(case.timestamp),
        created_at: Set(case.timestamp),
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert test case run: {}", e)))?;

    model_to_case_run(result)
}

impl DbPool {
    /// Get a single suite run by ID.
    pub async fn get_suite_run_by_id(&self, id: Uuid) -> AppResult<Option<TestSuiteRun>> {
        let result = SuiteRun::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test suite run: {}", e)))?;

        result.map(model_to_suite_run).transpose()
    }

    /// Suite runs whose timestamp falls within `[from, to]`, oldest first.
    pub async fn find_suites_by_time_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<TestSuiteRun>> {
        let result = SuiteRun::find()
            .filter(test_suite_run::Column::Timestamp.between(from, to))
            .order_by_asc(test_suite_run::Column::Timestamp)
            .order_by_asc(test_suite_run::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to query test suite runs by time: {}", e))
            })?;

        result.into_iter().map(model_to_suite_run).collect()
    }

    /// Case runs of one suite run, in report order.
    pub async fn find_cases_by_suite_id(&self, suite_run_id: Uuid) -> AppResult<Vec<TestCaseRun>> {
        let result = CaseRun::find()
            .filter(test_case_run::Column::SuiteRunId.eq(suite_run_id))
            .order_by_asc(test_case_run::Column::Sequence)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test case runs: {}", e)))?;

        result.into_iter().map(model_to_case_run).collect()
    }

    /// Every recorded case run.
    pub async fn find_all_cases(&self) -> AppResult<Vec<TestCaseRun>> {
        let result = CaseRun::find()
            .order_by_asc(test_case_run::Column::Id) // UUIDv7 is time-ordered
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test case runs: {}", e)))?;

        result.into_iter().map(model_to_case_run).collect()
    }
}

fn model_to_suite_run(model: test_suite_run::Model) -> AppResult<TestSuiteRun> {
    let status = SuiteStatus::parse(&model.status).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown suite status '{}' for suite run {}",
            model.status, model.id
        ))
    })?;

    Ok(TestSuiteRun {
        id: model.id,
        suite_name: model.suite_name,
        status,
        total_tests: model.total_tests,
        passed_tests: model.passed_tests,
        failed_tests: model.failed_tests,
        skipped_tests: model.skipped_tests,
        duration_ms: model.duration_ms,
        timestamp: model.timestamp,
        upload_source_id: model.upload_source_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn model_to_case_run(model: test_case_run::Model) -> AppResult<TestCaseRun> {
    let status = CaseStatus::parse(&model.status).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown case status '{}' for case run {}",
            model.status, model.id
        ))
    })?;

    Ok(TestCaseRun {
        id: model.id,
        suite_run_id: model.suite_run_id,
        test_name: model.test_name,
        status,
        duration_ms: model.duration_ms,
        error_message: model.error_message,
        timestamp: model.timestamp,
        created_at: model.created_at,
    })
}
