//! Repository for the `projects` table.

use folio_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::project::{Project, ProjectWithTaxonomy, UpsertProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, image_url, music_url, \
                       category_id, subcategory_id, views, created_at";

/// Projects joined with category and subcategory names. Append `WHERE` /
/// `ORDER BY` clauses as needed.
const SELECT_WITH_TAXONOMY: &str = "\
    SELECT p.id, p.title, p.slug, p.content, p.image_url, p.music_url, \
           p.category_id, p.subcategory_id, p.views, p.created_at, \
           c.name AS category_name, c.slug AS category_slug, \
           s.name AS subcategory_name \
    FROM projects p \
    JOIN categories c ON c.id = p.category_id \
    LEFT JOIN subcategories s ON s.id = p.subcategory_id";

/// Provides upsert, listing and delete operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project, or update it when a row with the same id exists.
    ///
    /// `views` and `created_at` are never touched by an update.
    pub async fn upsert(pool: &PgPool, input: &UpsertProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (id, title, slug, content, image_url, music_url, category_id, subcategory_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                slug = EXCLUDED.slug,
                content = EXCLUDED.content,
                image_url = EXCLUDED.image_url,
                music_url = EXCLUDED.music_url,
                category_id = EXCLUDED.category_id,
                subcategory_id = EXCLUDED.subcategory_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.id.unwrap_or_else(new_id))
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.music_url)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its public slug, with category and subcategory names.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ProjectWithTaxonomy>, sqlx::Error> {
        let query = format!("{SELECT_WITH_TAXONOMY} WHERE p.slug = $1");
        sqlx::query_as::<_, ProjectWithTaxonomy>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// All projects of one category, newest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<ProjectWithTaxonomy>, sqlx::Error> {
        let query = format!(
            "{SELECT_WITH_TAXONOMY} WHERE p.category_id = $1 ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, ProjectWithTaxonomy>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recently created projects across all categories.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ProjectWithTaxonomy>, sqlx::Error> {
        let query =
            format!("{SELECT_WITH_TAXONOMY} ORDER BY p.created_at DESC, p.id DESC LIMIT $1");
        sqlx::query_as::<_, ProjectWithTaxonomy>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every project, newest first, for the admin listing.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProjectWithTaxonomy>, sqlx::Error> {
        let query = format!("{SELECT_WITH_TAXONOMY} ORDER BY p.created_at DESC, p.id DESC");
        sqlx::query_as::<_, ProjectWithTaxonomy>(&query)
            .fetch_all(pool)
            .await
    }

    /// Slugs of a category's projects, newest first.
    pub async fn slugs_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT slug FROM projects WHERE category_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }

    /// Bump the view counter through the `increment_project_views` function.
    ///
    /// Unknown ids are a no-op, matching the function's behaviour.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT increment_project_views($1)")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
