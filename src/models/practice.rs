//! Practice article model for the testing knowledge base.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A markdown article describing a testing practice.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Practice {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Comma-joined tags, e.g. `"flaky,testing,quality"`.
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Practice {
    /// Split the stored tag string into individual tags.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}
