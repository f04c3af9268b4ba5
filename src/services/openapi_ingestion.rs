//! OpenAPI spec ingestion.

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use tracing::info;
use uuid::Uuid;

use crate::db::api_specs::{self, NewApiEndpoint, NewApiSpec};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ApiEndpoint, ApiSpec, SpecFormat};
use crate::parser::openapi;

/// Result of one ingestion call.
#[derive(Debug, Clone)]
pub struct IngestedSpec {
    pub spec: ApiSpec,
    pub endpoints: Vec<ApiEndpoint>,
}

/// Ingest an OpenAPI document using the current time.
pub async fn ingest_openapi_spec(
    pool: &DbPool,
    spec_text: &str,
    format: SpecFormat,
) -> AppResult<IngestedSpec> {
    ingest_openapi_spec_at(pool, spec_text, format, Utc::now()).await
}

/// Ingest an OpenAPI document, storing the raw text verbatim and one endpoint
/// row per (path, method). All rows commit together or not at all.
pub async fn ingest_openapi_spec_at(
    pool: &DbPool,
    spec_text: &str,
    format: SpecFormat,
    now: DateTime<Utc>,
) -> AppResult<IngestedSpec> {
    let parsed = openapi::parse(spec_text)?;
    let upload_source_id = Uuid::new_v4().to_string();

    let txn = pool
        .connection()
        .begin()
        .await
        .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

    let spec = api_specs::insert_api_spec(
        &txn,
        NewApiSpec {
            name: parsed.title.clone(),
            title: parsed.title,
            version: parsed.version,
            spec_content: spec_text.to_string(),
            spec_format: format,
            upload_source_id,
            created_at: now,
        },
    )
    .await?;

    let mut endpoints = Vec::with_capacity(parsed.endpoints.len());
    for (sequence, endpoint) in parsed.endpoints.into_iter().enumerate() {
        let saved = api_specs::insert_api_endpoint(
            &txn,
            NewApiEndpoint {
                spec_id: spec.id,
                method: endpoint.method,
                path: endpoint.path,
                summary: endpoint.summary,
                description: endpoint.description,
                sequence: sequence as i32,
                created_at: now,
            },
        )
        .await?;
        endpoints.push(saved);
    }

    txn.commit()
        .await
        .map_err(|e| AppError::Database(format!("Failed to commit OpenAPI ingestion: {}", e)))?;

    info!(
        spec_id = %spec.id,
        title = %spec.title,
        version = %spec.version,
        endpoints = endpoints.len(),
        "OpenAPI spec ingested"
    );

    Ok(IngestedSpec { spec, endpoints })
}
