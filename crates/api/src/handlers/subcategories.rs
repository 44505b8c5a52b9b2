//! Admin handlers for the `/admin/subcategories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::forms::SubcategoryForm;
use folio_core::types::DbId;
use folio_db::models::subcategory::{Subcategory, SubcategoryWithCategory, UpsertSubcategory};
use folio_db::repositories::SubcategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::{DataResponse, SavedResponse};
use crate::state::AppState;

const LISTING_PATH: &str = "/admin/subcategories";

/// GET /api/v1/admin/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<SubcategoryWithCategory>>>> {
    let subcategories = SubcategoryRepo::list_with_category(&state.pool).await?;
    Ok(Json(DataResponse {
        data: subcategories,
    }))
}

/// GET /api/v1/admin/subcategories/{id}
pub async fn get_subcategory(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Subcategory>>> {
    let subcategory = SubcategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;
    Ok(Json(DataResponse { data: subcategory }))
}

/// POST /api/v1/admin/subcategories
///
/// An unknown parent category surfaces as a 409 foreign-key violation.
pub async fn save_subcategory(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(form): Json<SubcategoryForm>,
) -> AppResult<Json<SavedResponse<Subcategory>>> {
    let valid = form.into_valid()?;
    let input = UpsertSubcategory {
        id: valid.id,
        name: valid.name,
        slug: valid.slug,
        category_id: valid.category_id,
    };

    let subcategory = SubcategoryRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        admin_id = %admin.admin_id,
        subcategory_id = %subcategory.id,
        category_id = %subcategory.category_id,
        "Subcategory saved"
    );

    Ok(Json(SavedResponse {
        data: subcategory,
        redirect_to: LISTING_PATH,
    }))
}

/// DELETE /api/v1/admin/subcategories/{id}
///
/// Projects in the subcategory stay, detached from it.
pub async fn delete_subcategory(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubcategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }));
    }
    tracing::info!(admin_id = %admin.admin_id, subcategory_id = %id, "Subcategory deleted");
    Ok(StatusCode::NO_CONTENT)
}
