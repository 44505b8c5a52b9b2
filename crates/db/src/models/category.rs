//! Category entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

/// DTO for inserting or updating a category. A `None` id inserts a new row.
#[derive(Debug, Clone)]
pub struct UpsertCategory {
    pub id: Option<DbId>,
    pub name: String,
    pub slug: String,
}
