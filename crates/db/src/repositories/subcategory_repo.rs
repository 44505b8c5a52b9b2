//! Repository for the `subcategories` table.

use folio_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::subcategory::{Subcategory, SubcategoryWithCategory, UpsertSubcategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, category_id, created_at";

/// Provides upsert, lookup and delete operations for subcategories.
pub struct SubcategoryRepo;

impl SubcategoryRepo {
    /// Insert a subcategory, or update it when a row with the same id exists.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSubcategory,
    ) -> Result<Subcategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO subcategories (id, name, slug, category_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                slug = EXCLUDED.slug,
                category_id = EXCLUDED.category_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(input.id.unwrap_or_else(new_id))
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subcategories WHERE id = $1");
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every subcategory with its parent category name, grouped by
    /// category name and then by subcategory name.
    pub async fn list_with_category(
        pool: &PgPool,
    ) -> Result<Vec<SubcategoryWithCategory>, sqlx::Error> {
        sqlx::query_as::<_, SubcategoryWithCategory>(
            "SELECT s.id, s.name, s.slug, s.category_id, s.created_at,
                    c.name AS category_name
             FROM subcategories s
             JOIN categories c ON c.id = s.category_id
             ORDER BY c.name ASC, s.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Subcategories belonging to one category, alphabetically.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subcategories WHERE category_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a subcategory. Projects pointing at it keep existing with no
    /// subcategory (`ON DELETE SET NULL`). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
