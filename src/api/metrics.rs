//! Metrics endpoints.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ApiCoverage, SummaryMetrics, TrendResponse};
use crate::services::metrics;

fn default_days() -> i64 {
    30
}

fn default_metric() -> String {
    "passRate".to_string()
}

fn default_period() -> String {
    "30d".to_string()
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

/// Query parameters for the trends endpoint.
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default = "default_period")]
    pub period: String,
}

/// Pass, failure and flaky rates over the trailing window.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/summary",
    tag = "Metrics",
    params(("days" = Option<i64>, Query, description = "Window in days (default 30)")),
    responses(
        (status = 200, description = "Summary metrics", body = SummaryMetrics),
        (status = 400, description = "Invalid window", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_summary(
    pool: web::Data<DbPool>,
    query: web::Query<SummaryQuery>,
) -> AppResult<HttpResponse> {
    let summary = metrics::summary_metrics(&pool, query.days).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Daily pass or failure rate over a period.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/trends",
    tag = "Metrics",
    params(
        ("metric" = Option<String>, Query, description = "passRate (default) or failureRate"),
        ("period" = Option<String>, Query, description = "7d, 30d (default) or 90d")
    ),
    responses(
        (status = 200, description = "Trend per UTC date", body = TrendResponse)
    )
)]
pub async fn get_trends(
    pool: web::Data<DbPool>,
    query: web::Query<TrendQuery>,
) -> AppResult<HttpResponse> {
    let trend = metrics::trend(&pool, &query.metric, &query.period).await?;
    Ok(HttpResponse::Ok().json(trend))
}

/// Share of a spec's endpoints referenced by recorded test names.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/api-coverage/{spec_id}",
    tag = "Metrics",
    params(("spec_id" = Uuid, Path, description = "Spec ID")),
    responses(
        (status = 200, description = "API coverage", body = ApiCoverage)
    )
)]
pub async fn get_api_coverage(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let coverage = metrics::api_coverage(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(coverage))
}

/// Configure metrics routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/metrics/summary").route(web::get().to(get_summary)))
        .service(web::resource("/metrics/trends").route(web::get().to(get_trends)))
        .service(
            web::resource("/metrics/api-coverage/{spec_id}")
                .route(web::get().to(get_api_coverage)),
        );
}
