//! JUnit report upload and lookup handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{TestCaseRun, TestSuiteRun};
use crate::services::junit_ingestion;

use super::upload::read_text_file;

/// Response for a successful JUnit upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct JunitUploadResponse {
    pub status: &'static str,
    pub message: String,
    /// Batch token shared by every suite of this upload.
    pub upload_source_id: String,
    pub suite_ids: Vec<Uuid>,
    /// Number of suites ingested.
    pub suites: usize,
}

/// Cases of one suite run.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuiteCasesResponse {
    pub suite_id: Uuid,
    pub cases: Vec<TestCaseRun>,
    pub total: usize,
}

/// Upload a JUnit XML report (multipart field `file`).
#[utoipa::path(
    post,
    path = "/api/v1/junit/upload",
    tag = "JUnit",
    request_body(content_type = "multipart/form-data", description = "JUnit XML report in field 'file'"),
    responses(
        (status = 200, description = "Report ingested", body = JunitUploadResponse),
        (status = 400, description = "Malformed report", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_junit(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let file = read_text_file(payload, config.max_upload_size).await?;
    info!(filename = %file.filename, bytes = file.content.len(), "Received JUnit report");

    let report = junit_ingestion::ingest_junit_report(&pool, &file.content).await?;
    let suite_ids = report.suite_ids();

    Ok(HttpResponse::Ok().json(JunitUploadResponse {
        status: "success",
        message: "JUnit report uploaded and parsed".to_string(),
        upload_source_id: report.upload_source_id,
        suites: suite_ids.len(),
        suite_ids,
    }))
}

/// Get one suite run.
#[utoipa::path(
    get,
    path = "/api/v1/junit/{suite_id}",
    tag = "JUnit",
    params(("suite_id" = Uuid, Path, description = "Suite run ID")),
    responses(
        (status = 200, description = "Suite run", body = TestSuiteRun),
        (status = 404, description = "Suite run not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_suite(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    let suite = pool
        .get_suite_run_by_id(suite_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test suite run {}", suite_id)))?;

    Ok(HttpResponse::Ok().json(suite))
}

/// List the cases of a suite run in report order.
#[utoipa::path(
    get,
    path = "/api/v1/junit/{suite_id}/cases",
    tag = "JUnit",
    params(("suite_id" = Uuid, Path, description = "Suite run ID")),
    responses(
        (status = 200, description = "Cases of the suite run", body = SuiteCasesResponse)
    )
)]
pub async fn get_suite_cases(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    let cases = pool.find_cases_by_suite_id(suite_id).await?;

    Ok(HttpResponse::Ok().json(SuiteCasesResponse {
        suite_id,
        total: cases.len(),
        cases,
    }))
}

/// Configure JUnit routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/junit/upload").route(web::post().to(upload_junit)))
        .service(web::resource("/junit/{suite_id}").route(web::get().to(get_suite)))
        .service(web::resource("/junit/{suite_id}/cases").route(web::get().to(get_suite_cases)));
}
