//! Subcategory entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subcategories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategory {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub category_id: DbId,
    pub created_at: Timestamp,
}

/// Subcategory joined with its parent category's name, for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubcategoryWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub subcategory: Subcategory,
    pub category_name: String,
}

/// DTO for inserting or updating a subcategory. A `None` id inserts a new row.
#[derive(Debug, Clone)]
pub struct UpsertSubcategory {
    pub id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub category_id: DbId,
}
