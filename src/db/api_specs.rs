//! Database queries for API specs and their endpoints.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::api_endpoint::{self, ActiveModel as EndpointActiveModel, Entity as Endpoint};
use crate::entity::api_spec::{self, ActiveModel as SpecActiveModel, Entity as Spec};
use crate::error::{AppError, AppResult};
use crate::models::{ApiEndpoint, ApiSpec, HttpMethod, SpecFormat};

use super::DbPool;

/// Represents a spec to be inserted.
pub struct NewApiSpec {
    pub name: String,
    pub title: String,
    pub version: String,
    pub spec_content: String,
    pub spec_format: SpecFormat,
    pub upload_source_id: String,
    pub created_at: DateTime<Utc>,
}

/// Represents an endpoint to be inserted.
pub struct NewApiEndpoint {
    pub spec_id: Uuid,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub sequence: i32,
    pub created_at: DateTime<Utc>,
}

/// Insert an API spec.
pub async fn insert_api_spec<C: ConnectionTrait>(db: &C, spec: NewApiSpec) -> AppResult<ApiSpec> {
    let model = SpecActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(spec.name),
        title: Set(spec.title),
        version: Set(spec.version),
        spec_content: Set(spec.spec_content),
        spec_format: Set(spec.spec_format.as_str().to_string()),
        upload_source_id: Set(spec.upload_source_id),
        created_at: Set(spec.created_at),
        updated_at: Set(spec.created_at),
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert API spec: {}", e)))?;

    model_to_api_spec(result)
}

/// Insert one endpoint of an already inserted spec.
pub async fn insert_api_endpoint<C: ConnectionTrait>(
    db: &C,
    endpoint: NewApiEndpoint,
) -> AppResult<ApiEndpoint> {
    let model = EndpointActiveModel {
        id: Set(Uuid::now_v7()),
        spec_id: Set(endpoint.spec_id),
        method: Set(endpoint.method.as_str().to_string()),
        path: Set(endpoint.path),
        summary: Set(endpoint.summary),
        description: Set(endpoint.description),
        sequence: Set(endpoint.sequence),
        created_at: Set(endpoint.created_at),
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert API endpoint: {}", e)))?;

    model_to_api_endpoint(result)
}

impl DbPool {
    /// Get a spec by ID.
    pub async fn get_api_spec_by_id(&self, id: Uuid) -> AppResult<Option<ApiSpec>> {
        let result = Spec::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get API spec: {}", e)))?;

        result.map(model_to_api_spec).transpose()
    }

    /// Endpoints of a spec in document order. Empty when the spec is unknown.
    pub async fn find_endpoints_by_spec_id(&self, spec_id: Uuid) -> AppResult<Vec<ApiEndpoint>> {
        let result = Endpoint::find()
            .filter(api_endpoint::Column::SpecId.eq(spec_id))
            .order_by_asc(api_endpoint::Column::Sequence)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get API endpoints: {}", e)))?;

        result.into_iter().map(model_to_api_endpoint).collect()
    }
}

fn model_to_api_spec(model: api_spec::Model) -> AppResult<ApiSpec> {
    let spec_format = SpecFormat::parse(&model.spec_format).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown spec format '{}' for API spec {}",
            model.spec_format, model.id
        ))
    })?;

    Ok(ApiSpec {
        id: model.id,
        name: model.name,
        title: model.title,
        version: model.version,
        spec_content: model.spec_content,
        spec_format,
        upload_source_id: model.upload_source_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn model_to_api_endpoint(model: api_endpoint::Model) -> AppResult<ApiEndpoint> {
    let method = HttpMethod::parse(&model.method).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown HTTP method '{}' for API endpoint {}",
            model.method, model.id
        ))
    })?;

    Ok(ApiEndpoint {
        id: model.id,
        spec_id: model.spec_id,
        method,
        path: model.path,
        summary: model.summary,
        description: model.description,
        created_at: model.created_at,
    })
}
