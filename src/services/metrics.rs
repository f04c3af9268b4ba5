//! Quality metrics over persisted runs and endpoints.
//!
//! The rate and bucketing functions are pure and operate on slices; the async
//! wrappers only fetch the rows they need. Missing data degrades to zero
//! values, never to an error.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::metrics::format_percent;
use crate::models::{
    ApiCoverage, ApiEndpoint, CaseStatus, SummaryMetrics, TestCaseRun, TestSuiteRun, TrendMetric,
    TrendResponse,
};

/// Window used when a trend period token is not recognized.
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

/// `sum(passed) / sum(total)`, or `0.0` when there is nothing to divide by.
pub fn pass_rate(suites: &[TestSuiteRun]) -> f64 {
    ratio(suites, |s| s.passed_tests)
}

/// `sum(failed) / sum(total)`, or `0.0` when there is nothing to divide by.
pub fn failure_rate(suites: &[TestSuiteRun]) -> f64 {
    ratio(suites, |s| s.failed_tests)
}

fn ratio(suites: &[TestSuiteRun], numerator: impl Fn(&TestSuiteRun) -> i32) -> f64 {
    let total: i64 = suites.iter().map(|s| i64::from(s.total_tests)).sum();
    if total == 0 {
        return 0.0;
    }
    let part: i64 = suites.iter().map(|s| i64::from(numerator(s))).sum();
    part as f64 / total as f64
}

/// Number of distinct test names seen both passing and failing.
///
/// Skipped outcomes never make a test flaky on their own.
pub fn flaky_test_count(cases: &[TestCaseRun]) -> usize {
    outcomes_by_name(cases)
        .values()
        .filter(|(runs, statuses)| {
            *runs > 1
                && statuses.contains(&CaseStatus::Passed)
                && statuses.contains(&CaseStatus::Failed)
        })
        .count()
}

/// Flaky tests over distinct test names; `0.0` with no recorded cases.
pub fn flaky_rate(cases: &[TestCaseRun]) -> f64 {
    let distinct = outcomes_by_name(cases).len();
    if distinct == 0 {
        return 0.0;
    }
    flaky_test_count(cases) as f64 / distinct as f64
}

fn outcomes_by_name(cases: &[TestCaseRun]) -> HashMap<&str, (usize, HashSet<CaseStatus>)> {
    let mut by_name: HashMap<&str, (usize, HashSet<CaseStatus>)> = HashMap::new();
    for case in cases {
        let entry = by_name.entry(case.test_name.as_str()).or_default();
        entry.0 += 1;
        entry.1.insert(case.status);
    }
    by_name
}

/// Endpoints whose `"METHOD path"` signature appears verbatim inside at least
/// one test name.
pub fn tested_endpoint_count(endpoints: &[ApiEndpoint], cases: &[TestCaseRun]) -> usize {
    endpoints
        .iter()
        .map(ApiEndpoint::signature)
        .filter(|signature| cases.iter().any(|c| c.test_name.contains(signature.as_str())))
        .count()
}

/// Resolve a trend period token to a window in days.
pub fn period_days(period: &str) -> i64 {
    match period {
        "7d" => 7,
        "90d" => 90,
        _ => DEFAULT_PERIOD_DAYS,
    }
}

/// Group suites by UTC calendar date and evaluate `metric` per bucket.
///
/// An unrecognized metric still produces a bucket per date, valued `0.0`.
pub fn trend_buckets(suites: &[TestSuiteRun], metric: Option<TrendMetric>) -> BTreeMap<String, f64> {
    let mut by_date: BTreeMap<String, Vec<TestSuiteRun>> = BTreeMap::new();
    for suite in suites {
        by_date
            .entry(suite.timestamp.date_naive().to_string())
            .or_default()
            .push(suite.clone());
    }

    by_date
        .into_iter()
        .map(|(date, bucket)| {
            let value = match metric {
                Some(TrendMetric::PassRate) => pass_rate(&bucket),
                Some(TrendMetric::FailureRate) => failure_rate(&bucket),
                None => 0.0,
            };
            (date, value)
        })
        .collect()
}

fn window_start(now: DateTime<Utc>, days: i64) -> AppResult<DateTime<Utc>> {
    if days < 0 {
        return Err(AppError::InvalidInput(format!(
            "Window must be a non-negative number of days, got {}",
            days
        )));
    }

    TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| AppError::InvalidInput(format!("Window of {} days is too large", days)))
}

/// Summary over suites from the last `days` days.
pub async fn summary_metrics(pool: &DbPool, days: i64) -> AppResult<SummaryMetrics> {
    summary_metrics_at(pool, days, Utc::now()).await
}

pub async fn summary_metrics_at(
    pool: &DbPool,
    days: i64,
    now: DateTime<Utc>,
) -> AppResult<SummaryMetrics> {
    let from = window_start(now, days)?;
    let suites = pool.find_suites_by_time_range(from, now).await?;
    let cases = pool.find_all_cases().await?;

    let sum = |f: fn(&TestSuiteRun) -> i32| suites.iter().map(|s| i64::from(f(s))).sum::<i64>();

    Ok(SummaryMetrics {
        window_days: days,
        pass_rate: format_percent(pass_rate(&suites)),
        failure_rate: format_percent(failure_rate(&suites)),
        flaky_rate: format_percent(flaky_rate(&cases)),
        total_test_runs: suites.len(),
        total_run_suites: suites.len(),
        total_tests_executed: sum(|s| s.total_tests),
        total_passed: sum(|s| s.passed_tests),
        total_failed: sum(|s| s.failed_tests),
        timestamp: now,
    })
}

/// Coverage of a spec's endpoints by recorded test names.
///
/// An unknown spec has no endpoints and therefore zero coverage.
pub async fn api_coverage(pool: &DbPool, spec_id: Uuid) -> AppResult<ApiCoverage> {
    let endpoints = pool.find_endpoints_by_spec_id(spec_id).await?;
    let cases = if endpoints.is_empty() {
        Vec::new()
    } else {
        pool.find_all_cases().await?
    };

    let tested = tested_endpoint_count(&endpoints, &cases);
    let coverage = if endpoints.is_empty() {
        0.0
    } else {
        tested as f64 / endpoints.len() as f64
    };

    Ok(ApiCoverage {
        spec_id,
        total_endpoints: endpoints.len(),
        tested_endpoints: tested,
        coverage: format_percent(coverage),
        coverage_decimal: coverage,
    })
}

/// Per-day values of `metric` over the window named by `period`.
pub async fn trend(pool: &DbPool, metric: &str, period: &str) -> AppResult<TrendResponse> {
    trend_at(pool, metric, period, Utc::now()).await
}

pub async fn trend_at(
    pool: &DbPool,
    metric: &str,
    period: &str,
    now: DateTime<Utc>,
) -> AppResult<TrendResponse> {
    let from = window_start(now, period_days(period))?;
    let suites = pool.find_suites_by_time_range(from, now).await?;
    let trend = trend_buckets(&suites, TrendMetric::parse(metric));

    Ok(TrendResponse {
        metric: metric.to_string(),
        period: period.to_string(),
        data_points: trend.len(),
        trend,
    })
}
