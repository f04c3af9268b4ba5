//! Test scaffold generation endpoints.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::ApiEndpoint;
use crate::services::generator::{self, GeneratorOptions};

/// Generation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GeneratorRequest {
    /// Base URL of the API under test; the server default is used when omitted.
    pub base_url: Option<String>,
    pub openapi_spec_id: Uuid,
    #[serde(default)]
    pub options: GeneratorRequestOptions,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(default)]
pub struct GeneratorRequestOptions {
    pub include_negative_tests: bool,
    /// Reserved, currently ignored.
    pub include_contract_validation: bool,
}

impl Default for GeneratorRequestOptions {
    fn default() -> Self {
        let defaults = GeneratorOptions::default();
        Self {
            include_negative_tests: defaults.include_negative_tests,
            include_contract_validation: defaults.include_contract_validation,
        }
    }
}

impl From<&GeneratorRequestOptions> for GeneratorOptions {
    fn from(options: &GeneratorRequestOptions) -> Self {
        GeneratorOptions {
            include_negative_tests: options.include_negative_tests,
            include_contract_validation: options.include_contract_validation,
        }
    }
}

/// Generated test class returned by the preview endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub status: &'static str,
    pub code: String,
    pub lines: usize,
}

/// Resolve the request's spec endpoints and base URL. 404 when the spec does
/// not exist.
async fn load_inputs(
    pool: &DbPool,
    config: &Config,
    request: &GeneratorRequest,
) -> AppResult<(String, Vec<ApiEndpoint>)> {
    let spec_id = request.openapi_spec_id;
    if pool.get_api_spec_by_id(spec_id).await?.is_none() {
        return Err(AppError::NotFound(format!("API spec {}", spec_id)));
    }

    let endpoints = pool.find_endpoints_by_spec_id(spec_id).await?;
    let base_url = match request.base_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => config.default_base_url.clone(),
    };

    Ok((base_url, endpoints))
}

/// Download a Gradle project with RestAssured tests for a spec.
#[utoipa::path(
    post,
    path = "/api/v1/generator/restassured",
    tag = "Generator",
    request_body = GeneratorRequest,
    responses(
        (status = 200, description = "ZIP archive", content_type = "application/zip"),
        (status = 404, description = "Spec not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate_restassured(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<GeneratorRequest>,
) -> AppResult<HttpResponse> {
    let (base_url, endpoints) = load_inputs(&pool, &config, &body).await?;
    let artifact =
        generator::generate_test_artifact(&base_url, &endpoints, (&body.options).into());
    let archive = generator::package_zip(&artifact)?;

    info!(
        spec_id = %body.openapi_spec_id,
        endpoints = endpoints.len(),
        bytes = archive.len(),
        "Generated RestAssured scaffold"
    );

    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", generator::ARCHIVE_NAME),
        ))
        .body(archive))
}

/// Preview the generated test class without packaging it.
#[utoipa::path(
    post,
    path = "/api/v1/generator/preview",
    tag = "Generator",
    request_body = GeneratorRequest,
    responses(
        (status = 200, description = "Generated test class", body = PreviewResponse),
        (status = 404, description = "Spec not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn preview(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<GeneratorRequest>,
) -> AppResult<HttpResponse> {
    let (base_url, endpoints) = load_inputs(&pool, &config, &body).await?;
    let code = generator::render_test_source(&base_url, &endpoints, (&body.options).into());

    Ok(HttpResponse::Ok().json(PreviewResponse {
        status: "success",
        lines: code.lines().count(),
        code,
    }))
}

/// Configure generator routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/generator/restassured").route(web::post().to(generate_restassured)),
    )
    .service(web::resource("/generator/preview").route(web::post().to(preview)));
}
