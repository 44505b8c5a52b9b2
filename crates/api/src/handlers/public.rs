//! Anonymous handlers backing the public portfolio site.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::types::DbId;
use folio_db::repositories::ProjectRepo;

use crate::content::{self, ProjectDetail, ProjectView, SectionView};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/sections/{category_slug}
///
/// Flat project list plus subcategory tabs. Unknown sections are empty, not 404.
pub async fn get_section(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> Json<DataResponse<SectionView>> {
    let projects =
        content::projects_by_category(&state.pool, state.media_base_url(), &category_slug).await;
    Json(DataResponse {
        data: SectionView::new(projects),
    })
}

/// GET /api/v1/sections/{category_slug}/slugs
pub async fn list_section_slugs(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> Json<DataResponse<Vec<String>>> {
    let slugs = content::project_slugs_by_category(&state.pool, &category_slug).await;
    Json(DataResponse { data: slugs })
}

/// GET /api/v1/featured
pub async fn list_featured(State(state): State<AppState>) -> Json<DataResponse<Vec<ProjectView>>> {
    let projects = content::featured_projects(&state.pool, state.media_base_url()).await;
    Json(DataResponse { data: projects })
}

/// GET /api/v1/projects/{project}
///
/// `project` is the slug.
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = content::project_by_slug(&state.pool, state.media_base_url(), &slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Project '{slug}' not found")))?;
    Ok(Json(DataResponse {
        data: ProjectDetail::from(project),
    }))
}

/// POST /api/v1/projects/{project}/views
///
/// `project` is the id. Bumps the view counter. Unknown ids are accepted silently.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ProjectRepo::increment_views(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
