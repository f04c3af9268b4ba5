//! Database queries for practice articles.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::practice::{self, ActiveModel, Entity as PracticeEntity};
use crate::error::{AppError, AppResult};
use crate::models::Practice;

use super::DbPool;

/// Represents a practice article to be inserted.
pub struct NewPractice {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a practice article.
pub async fn insert_practice<C: ConnectionTrait>(db: &C, practice: NewPractice) -> AppResult<Practice> {
    let model = ActiveModel {
        id: Set(Uuid::now_v7()),
        slug: Set(practice.slug),
        title: Set(practice.title),
        content: Set(practice.content),
        tags: Set(practice.tags),
        created_at: Set(practice.created_at),
        updated_at: Set(practice.created_at),
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert practice: {}", e)))?;

    Ok(model_to_practice(result))
}

impl DbPool {
    /// Number of stored practice articles.
    pub async fn count_practices(&self) -> AppResult<u64> {
        PracticeEntity::find()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count practices: {}", e)))
    }

    /// All practice articles ordered by slug.
    pub async fn list_practices(&self) -> AppResult<Vec<Practice>> {
        let result = PracticeEntity::find()
            .order_by_asc(practice::Column::Slug)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list practices: {}", e)))?;

        Ok(result.into_iter().map(model_to_practice).collect())
    }

    /// Find a practice article by slug.
    pub async fn find_practice_by_slug(&self, slug: &str) -> AppResult<Option<Practice>> {
        let result = PracticeEntity::find()
            .filter(practice::Column::Slug.eq(slug))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get practice: {}", e)))?;

        Ok(result.map(model_to_practice))
    }

    /// Articles whose tag string contains `tag`.
    pub async fn find_practices_by_tag(&self, tag: &str) -> AppResult<Vec<Practice>> {
        let result = PracticeEntity::find()
            .filter(practice::Column::Tags.contains(tag))
            .order_by_asc(practice::Column::Slug)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to query practices by tag: {}", e)))?;

        Ok(result.into_iter().map(model_to_practice).collect())
    }

    /// Articles whose title or body contains `query`.
    pub async fn search_practices(&self, query: &str) -> AppResult<Vec<Practice>> {
        let result = PracticeEntity::find()
            .filter(
                Condition::any()
                    .add(practice::Column::Title.contains(query))
                    .add(practice::Column::Content.contains(query)),
            )
            .order_by_asc(practice::Column::Slug)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to search practices: {}", e)))?;

        Ok(result.into_iter().map(model_to_practice).collect())
    }
}

fn model_to_practice(model: practice::Model) -> Practice {
    Practice {
        id: model.id,
        slug: model.slug,
        title: model.title,
        content: model.content,
        tags: model.tags,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
