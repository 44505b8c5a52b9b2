//! Public read layer: section listings, subcategory tabs, featured projects
//! and project detail.
//!
//! Every function here degrades instead of failing. Read errors are logged
//! and turned into an empty list, an empty mapping or `None`, so a public page
//! always renders.

use folio_core::media::resolve_media_url;
use folio_core::types::{DbId, Timestamp};
use folio_core::view::{paragraphs, reading_minutes, CardDisplay};
use folio_db::models::project::ProjectWithTaxonomy;
use folio_db::repositories::{CategoryRepo, ProjectRepo};
use folio_db::DbPool;
use indexmap::IndexMap;
use serde::Serialize;

/// Number of projects shown on the home page.
pub const FEATURED_LIMIT: i64 = 6;

/// Subcategory name -> projects, in first-appearance order.
pub type Tabs = IndexMap<String, Vec<ProjectView>>;

/// A project as the public site renders it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    /// Absolute image URL.
    pub image_url: Option<String>,
    pub music_url: Option<String>,
    pub category_name: String,
    pub category_slug: String,
    pub subcategory_name: Option<String>,
    pub display: CardDisplay,
    pub reading_minutes: u32,
    pub views: i64,
    pub created_at: Timestamp,
}

impl ProjectView {
    pub fn from_row(row: ProjectWithTaxonomy, media_base_url: &str) -> Self {
        let project = row.project;
        let image_url = resolve_media_url(project.image_url.as_deref(), media_base_url);
        let music_url = project.music_url.filter(|u| !u.trim().is_empty());
        let content = project.content.filter(|c| !c.trim().is_empty());

        Self {
            display: CardDisplay::classify(
                image_url.is_some(),
                music_url.is_some(),
                content.is_some(),
            ),
            reading_minutes: reading_minutes(content.as_deref()),
            id: project.id,
            title: project.title,
            slug: project.slug,
            content,
            image_url,
            music_url,
            category_name: row.category_name,
            category_slug: row.category_slug,
            subcategory_name: row.subcategory_name.filter(|n| !n.is_empty()),
            views: project.views,
            created_at: project.created_at,
        }
    }
}

/// A project detail page: the card data plus its text split into paragraphs.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectView,
    pub paragraphs: Vec<String>,
}

impl From<ProjectView> for ProjectDetail {
    fn from(project: ProjectView) -> Self {
        let paragraphs = project
            .content
            .as_deref()
            .map(|c| paragraphs(c).into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            project,
            paragraphs,
        }
    }
}

/// A section page: every project of the category plus its subcategory tabs.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub projects: Vec<ProjectView>,
    pub tabs: Tabs,
}

impl SectionView {
    pub fn new(projects: Vec<ProjectView>) -> Self {
        let tabs = group_by_subcategory(&projects);
        Self { projects, tabs }
    }
}

/// All projects of the category with `category_slug`, newest first.
///
/// An unknown category yields an empty list.
pub async fn projects_by_category(
    pool: &DbPool,
    media_base_url: &str,
    category_slug: &str,
) -> Vec<ProjectView> {
    let category = match CategoryRepo::find_by_slug(pool, category_slug).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            tracing::warn!(category_slug, "Category not found; section is empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::error!(category_slug, error = %e, "Failed to load category");
            return Vec::new();
        }
    };

    match ProjectRepo::list_by_category(pool, category.id).await {
        Ok(rows) => rows
            .into_iter()
            .map(|row| ProjectView::from_row(row, media_base_url))
            .collect(),
        Err(e) => {
            tracing::error!(category_slug, error = %e, "Failed to load section projects");
            Vec::new()
        }
    }
}

/// Partition projects into tabs keyed by subcategory name.
///
/// Input order is preserved within each tab and tabs appear in the order their
/// first project does. Projects without a subcategory are left out.
pub fn group_by_subcategory(projects: &[ProjectView]) -> Tabs {
    let mut tabs = Tabs::new();
    for project in projects {
        if let Some(name) = &project.subcategory_name {
            tabs.entry(name.clone()).or_default().push(project.clone());
        }
    }
    tabs
}

/// Subcategory tabs of a section; empty when the category is unknown.
pub async fn category_tabs(pool: &DbPool, media_base_url: &str, category_slug: &str) -> Tabs {
    let projects = projects_by_category(pool, media_base_url, category_slug).await;
    group_by_subcategory(&projects)
}

/// One project by slug, or `None` when missing or unreadable.
pub async fn project_by_slug(
    pool: &DbPool,
    media_base_url: &str,
    slug: &str,
) -> Option<ProjectView> {
    match ProjectRepo::find_by_slug(pool, slug).await {
        Ok(row) => row.map(|row| ProjectView::from_row(row, media_base_url)),
        Err(e) => {
            tracing::error!(slug, error = %e, "Failed to load project");
            None
        }
    }
}

/// The [`FEATURED_LIMIT`] newest projects across all categories.
pub async fn featured_projects(pool: &DbPool, media_base_url: &str) -> Vec<ProjectView> {
    match ProjectRepo::list_recent(pool, FEATURED_LIMIT).await {
        Ok(rows) => rows
            .into_iter()
            .map(|row| ProjectView::from_row(row, media_base_url))
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load featured projects");
            Vec::new()
        }
    }
}

/// Slugs of every project in a section, newest first.
pub async fn project_slugs_by_category(pool: &DbPool, category_slug: &str) -> Vec<String> {
    let category = match CategoryRepo::find_by_slug(pool, category_slug).await {
        Ok(Some(category)) => category,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!(category_slug, error = %e, "Failed to load category");
            return Vec::new();
        }
    };

    ProjectRepo::slugs_by_category(pool, category.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(category_slug, error = %e, "Failed to load project slugs");
            Vec::new()
        })
}
