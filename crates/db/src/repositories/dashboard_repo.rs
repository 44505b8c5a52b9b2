//! Aggregate queries for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{ContentCounts, RecentProject};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Count projects, categories and subcategories in one round trip.
    pub async fn counts(pool: &PgPool) -> Result<ContentCounts, sqlx::Error> {
        let (projects, categories, subcategories): (i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM projects),
                (SELECT COUNT(*) FROM categories),
                (SELECT COUNT(*) FROM subcategories)",
        )
        .fetch_one(pool)
        .await?;

        Ok(ContentCounts {
            projects,
            categories,
            subcategories,
        })
    }

    /// The `limit` newest projects (id, title, creation time only).
    pub async fn recent_projects(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RecentProject>, sqlx::Error> {
        sqlx::query_as::<_, RecentProject>(
            "SELECT id, title, created_at FROM projects
             ORDER BY created_at DESC, id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
