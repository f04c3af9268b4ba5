//! Metric payloads returned by the metrics engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Quality summary over a trailing window of suite runs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryMetrics {
    pub window_days: i64,
    /// Percentage with two decimals, e.g. `"66.67%"`.
    pub pass_rate: String,
    pub failure_rate: String,
    /// Computed over every recorded case, not just the window.
    pub flaky_rate: String,
    pub total_test_runs: usize,
    pub total_run_suites: usize,
    pub total_tests_executed: i64,
    pub total_passed: i64,
    pub total_failed: i64,
    pub timestamp: DateTime<Utc>,
}

/// Share of a spec's endpoints referenced by recorded test names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiCoverage {
    pub spec_id: Uuid,
    pub total_endpoints: usize,
    pub tested_endpoints: usize,
    pub coverage: String,
    pub coverage_decimal: f64,
}

/// Per-day metric values over a period.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrendResponse {
    pub metric: String,
    pub period: String,
    /// ISO date (`YYYY-MM-DD`) to metric value, sorted by date.
    pub trend: BTreeMap<String, f64>,
    pub data_points: usize,
}

/// Metrics that can be charted as a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMetric {
    PassRate,
    FailureRate,
}

impl TrendMetric {
    /// Parse the query token (`passRate`, `failureRate`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passRate" => Some(Self::PassRate),
            "failureRate" => Some(Self::FailureRate),
            _ => None,
        }
    }
}

/// Render a ratio as a percentage string with two decimals.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
