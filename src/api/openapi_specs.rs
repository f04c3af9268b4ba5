//! OpenAPI spec upload and lookup handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ApiEndpoint, ApiSpec, SpecFormat};
use crate::services::openapi_ingestion;

use super::upload::read_text_file;

/// Response for a successful spec upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpecUploadResponse {
    pub status: &'static str,
    pub message: String,
    pub spec_id: Uuid,
    pub endpoints: usize,
}

/// Endpoints of one spec.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpecEndpointsResponse {
    pub spec_id: Uuid,
    pub endpoints: Vec<ApiEndpoint>,
    pub total: usize,
}

/// Upload an OpenAPI document (multipart field `file`).
///
/// A `.yaml`/`.yml` filename records the spec as YAML, anything else as JSON.
#[utoipa::path(
    post,
    path = "/api/v1/openapi/upload",
    tag = "OpenAPI",
    request_body(content_type = "multipart/form-data", description = "OpenAPI 3.x document in field 'file'"),
    responses(
        (status = 200, description = "Spec ingested", body = SpecUploadResponse),
        (status = 400, description = "Unparsable document", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_spec(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let file = read_text_file(payload, config.max_upload_size).await?;
    let format = SpecFormat::from_filename(&file.filename);
    info!(filename = %file.filename, format = format.as_str(), "Received OpenAPI spec");

    let ingested = openapi_ingestion::ingest_openapi_spec(&pool, &file.content, format).await?;

    Ok(HttpResponse::Ok().json(SpecUploadResponse {
        status: "success",
        message: "OpenAPI spec uploaded and parsed".to_string(),
        spec_id: ingested.spec.id,
        endpoints: ingested.endpoints.len(),
    }))
}

/// Get an uploaded spec, including its raw text.
#[utoipa::path(
    get,
    path = "/api/v1/openapi/{spec_id}",
    tag = "OpenAPI",
    params(("spec_id" = Uuid, Path, description = "Spec ID")),
    responses(
        (status = 200, description = "Spec", body = ApiSpec),
        (status = 404, description = "Spec not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_spec(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let spec_id = path.into_inner();
    let spec = pool
        .get_api_spec_by_id(spec_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("API spec {}", spec_id)))?;

    Ok(HttpResponse::Ok().json(spec))
}

/// List the endpoints of a spec in document order.
#[utoipa::path(
    get,
    path = "/api/v1/openapi/{spec_id}/endpoints",
    tag = "OpenAPI",
    params(("spec_id" = Uuid, Path, description = "Spec ID")),
    responses(
        (status = 200, description = "Endpoints of the spec", body = SpecEndpointsResponse)
    )
)]
pub async fn get_spec_endpoints(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let spec_id = path.into_inner();
    let endpoints = pool.find_endpoints_by_spec_id(spec_id).await?;

    Ok(HttpResponse::Ok().json(SpecEndpointsResponse {
        spec_id,
        total: endpoints.len(),
        endpoints,
    }))
}

/// Configure OpenAPI spec routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/openapi/upload").route(web::post().to(upload_spec)))
        .service(web::resource("/openapi/{spec_id}").route(web::get().to(get_spec)))
        .service(
            web::resource("/openapi/{spec_id}/endpoints").route(web::get().to(get_spec_endpoints)),
        );
}
