//! Admin dashboard aggregates.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentCounts {
    pub projects: i64,
    pub categories: i64,
    pub subcategories: i64,
}

/// Compact project row for the "recent projects" table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentProject {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}
