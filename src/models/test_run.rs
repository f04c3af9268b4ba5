//! Test run models: suite runs and the case runs they own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Aggregate status of one ingested test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuiteStatus {
    Passed,
    Failed,
    Mixed,
}

impl SuiteStatus {
    /// Derive the suite status from its declared counts.
    ///
    /// Any failure makes the suite `failed`; otherwise it is `passed` only when
    /// every declared test passed, and `mixed` when some were skipped.
    pub fn from_counts(tests: i32, passed: i32, failures: i32) -> Self {
        if failures > 0 {
            Self::Failed
        } else if passed == tests {
            Self::Passed
        } else {
            Self::Mixed
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Mixed => "mixed",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

impl CaseStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `<testsuite>` as persisted after ingestion.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestSuiteRun {
    pub id: Uuid,
    pub suite_name: String,
    pub status: SuiteStatus,
    pub total_tests: i32,
    /// May be negative when the source report declares inconsistent counts.
    pub passed_tests: i32,
    pub failed_tests: i32,
    pub skipped_tests: i32,
    pub duration_ms: i64,
    /// Ingestion time shared by every record of the same upload.
    pub timestamp: DateTime<Utc>,
    /// Groups all suites ingested from one upload.
    pub upload_source_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One `<testcase>` as persisted after ingestion.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestCaseRun {
    pub id: Uuid,
    pub suite_run_id: Uuid,
    /// `classname.name`, or just `name` when the report has no classname.
    pub test_name: String,
    pub status: CaseStatus,
    pub duration_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
