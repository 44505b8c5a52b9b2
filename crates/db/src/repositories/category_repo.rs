//! Repository for the `categories` table.

use folio_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::category::{Category, UpsertCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, created_at";

/// Provides upsert, lookup and delete operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category, or update it when a row with the same id exists.
    ///
    /// A `None` id generates a fresh one, so the call always inserts.
    pub async fn upsert(pool: &PgPool, input: &UpsertCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (id, name, slug)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                slug = EXCLUDED.slug
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(input.id.unwrap_or_else(new_id))
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all categories alphabetically by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC, created_at ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Delete a category. Its subcategories go with it (`ON DELETE CASCADE`);
    /// categories that still own projects are refused by the database.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
