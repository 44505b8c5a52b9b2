//! Project entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub music_url: Option<String>,
    pub category_id: DbId,
    pub subcategory_id: Option<DbId>,
    pub views: i64,
    pub created_at: Timestamp,
}

/// A project joined with the names of its category and subcategory.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithTaxonomy {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub category_name: String,
    pub category_slug: String,
    pub subcategory_name: Option<String>,
}

/// DTO for inserting or updating a project. A `None` id inserts a new row.
#[derive(Debug, Clone)]
pub struct UpsertProject {
    pub id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub music_url: Option<String>,
    pub category_id: DbId,
    pub subcategory_id: Option<DbId>,
}
