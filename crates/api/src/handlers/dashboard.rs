//! Admin dashboard summary.

use axum::extract::State;
use axum::Json;
use folio_db::models::dashboard::{ContentCounts, RecentProject};
use folio_db::repositories::DashboardRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of recent projects listed on the dashboard.
const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub counts: ContentCounts,
    pub recent_projects: Vec<RecentProject>,
}

/// GET /api/v1/admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let counts = DashboardRepo::counts(&state.pool).await?;
    let recent_projects = DashboardRepo::recent_projects(&state.pool, RECENT_LIMIT).await?;
    Ok(Json(DataResponse {
        data: DashboardView {
            counts,
            recent_projects,
        },
    }))
}
