//! Testing practice knowledge base seeding.

use chrono::Utc;
use sea_orm::TransactionTrait;
use tracing::info;

use crate::db::practices::{self, NewPractice};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};

/// A bundled article.
pub struct SeedPractice {
    pub slug: &'static str,
    pub title: &'static str,
    pub tags: &'static str,
    pub content: &'static str,
}

/// Articles shipped with the server.
pub const SEED_PRACTICES: &[SeedPractice] = &[
    SeedPractice {
        slug: "functional-rest-testing",
        title: "Functional Testing for REST APIs",
        tags: "functional,rest,testing",
        content: include_str!("../../content/practices/functional-rest-testing.md"),
    },
    SeedPractice {
        slug: "contract-testing",
        title: "Contract Testing for APIs",
        tags: "contract,testing,openapi",
        content: include_str!("../../content/practices/contract-testing.md"),
    },
    SeedPractice {
        slug: "flaky-tests-playbook",
        title: "Identifying and Fixing Flaky Tests",
        tags: "flaky,testing,quality",
        content: include_str!("../../content/practices/flaky-tests-playbook.md"),
    },
    SeedPractice {
        slug: "ci-quality-gates",
        title: "CI/CD Quality Gates for Testing",
        tags: "ci,quality,gates",
        content: include_str!("../../content/practices/ci-quality-gates.md"),
    },
];

/// Insert the bundled articles when the table is empty.
///
/// Returns the number of inserted articles (0 when already seeded).
pub async fn ensure_seeded(pool: &DbPool) -> AppResult<usize> {
    if pool.count_practices().await? > 0 {
        return Ok(0);
    }

    let now = Utc::now();
    let txn = pool
        .connection()
        .begin()
        .await
        .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

    for seed in SEED_PRACTICES {
        practices::insert_practice(
            &txn,
            NewPractice {
                slug: seed.slug.to_string(),
                title: seed.title.to_string(),
                content: seed.content.to_string(),
                tags: seed.tags.to_string(),
                created_at: now,
            },
        )
        .await?;
    }

    txn.commit()
        .await
        .map_err(|e| AppError::Database(format!("Failed to commit practice seed: {}", e)))?;

    info!(count = SEED_PRACTICES.len(), "Seeded practice articles");
    Ok(SEED_PRACTICES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_slugs_are_unique_and_content_present() {
        let slugs: HashSet<_> = SEED_PRACTICES.iter().map(|p| p.slug).collect();
        assert_eq!(slugs.len(), SEED_PRACTICES.len());

        for practice in SEED_PRACTICES {
            assert!(practice.content.starts_with("# "), "{}", practice.slug);
            assert!(!practice.tags.is_empty());
        }
    }
}
