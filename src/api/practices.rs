//! Testing practice knowledge base endpoints.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::Practice;

/// Optional filters for the practice list. `tag` wins over `query`.
#[derive(Debug, Deserialize)]
pub struct PracticeListQuery {
    pub tag: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PracticeListResponse {
    pub practices: Vec<Practice>,
    pub total: usize,
}

/// List practice articles, optionally filtered by tag or text.
#[utoipa::path(
    get,
    path = "/api/v1/practices",
    tag = "Practices",
    params(
        ("tag" = Option<String>, Query, description = "Substring of the article tags"),
        ("query" = Option<String>, Query, description = "Substring of the title or body")
    ),
    responses(
        (status = 200, description = "Practice articles", body = PracticeListResponse)
    )
)]
pub async fn list_practices(
    pool: web::Data<DbPool>,
    query: web::Query<PracticeListQuery>,
) -> AppResult<HttpResponse> {
    let practices = match (&query.tag, &query.query) {
        (Some(tag), _) => pool.find_practices_by_tag(tag).await?,
        (None, Some(text)) => pool.search_practices(text).await?,
        (None, None) => pool.list_practices().await?,
    };

    Ok(HttpResponse::Ok().json(PracticeListResponse {
        total: practices.len(),
        practices,
    }))
}

/// Get one practice article by slug.
#[utoipa::path(
    get,
    path = "/api/v1/practices/{slug}",
    tag = "Practices",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Practice article", body = Practice),
        (status = 404, description = "Article not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_practice(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let practice = pool
        .find_practice_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Practice '{}'", slug)))?;

    Ok(HttpResponse::Ok().json(practice))
}

/// Configure practice routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/practices").route(web::get().to(list_practices)))
        .service(web::resource("/practices/{slug}").route(web::get().to(get_practice)));
}
