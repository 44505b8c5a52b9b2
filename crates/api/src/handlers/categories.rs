//! Admin handlers for the `/admin/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::forms::CategoryForm;
use folio_core::types::DbId;
use folio_db::models::category::{Category, UpsertCategory};
use folio_db::models::subcategory::Subcategory;
use folio_db::repositories::{CategoryRepo, SubcategoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::{DataResponse, SavedResponse};
use crate::state::AppState;

/// Admin listing the client returns to after a save.
const LISTING_PATH: &str = "/admin/categories";

/// GET /api/v1/admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/admin/categories/{id}/subcategories
///
/// Subcategory choices offered by the project form for this category.
pub async fn list_category_subcategories(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Subcategory>>>> {
    let subcategories = SubcategoryRepo::list_by_category(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: subcategories,
    }))
}

/// POST /api/v1/admin/categories
///
/// Insert when `id` is absent, update otherwise. The slug is derived from the
/// name when not supplied.
pub async fn save_category(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(form): Json<CategoryForm>,
) -> AppResult<Json<SavedResponse<Category>>> {
    let valid = form.into_valid()?;
    let input = UpsertCategory {
        id: valid.id,
        name: valid.name,
        slug: valid.slug,
    };

    let category = CategoryRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        admin_id = %admin.admin_id,
        category_id = %category.id,
        slug = %category.slug,
        "Category saved"
    );

    Ok(Json(SavedResponse {
        data: category,
        redirect_to: LISTING_PATH,
    }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Subcategories go with the category. A category that still owns projects is
/// refused with 409.
pub async fn delete_category(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    tracing::info!(admin_id = %admin.admin_id, category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
