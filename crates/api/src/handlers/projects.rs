//! Admin handlers for the `/admin/projects` resource.
//!
//! Saves arrive as `multipart/form-data` so an image file can travel with the
//! text fields. Deletes remove the stored image on a best-effort basis.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::forms::{ProjectForm, ValidProject};
use folio_core::media::{object_path_for, upload_object_name, MediaKind};
use folio_core::types::DbId;
use folio_db::models::project::{Project, UpsertProject};
use folio_db::repositories::{CategoryRepo, ProjectRepo, SubcategoryRepo};
use image::ImageFormat;

use crate::content::ProjectView;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::{DataResponse, SavedResponse};
use crate::state::AppState;

const LISTING_PATH: &str = "/admin/projects";

/// Image formats accepted for upload.
const ACCEPTED_IMAGE_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// An uploaded file part.
struct ImageUpload {
    file_name: String,
    bytes: Vec<u8>,
}

/// GET /api/v1/admin/projects
pub async fn list_projects(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<ProjectView>>>> {
    let base = state.media_base_url();
    let projects = ProjectRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .map(|row| ProjectView::from_row(row, base))
        .collect();
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/admin/projects/{id}
///
/// Raw stored values, for populating the edit form.
pub async fn get_project(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = find_project(&state, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/admin/projects
///
/// Multipart fields: `id`, `title`, `slug`, `content`, `music_url`,
/// `image_url`, `category_id`, `subcategory_id` and an optional `image` file.
///
/// Fields are validated before anything is uploaded. A new image replaces the
/// stored reference; without one the submitted `image_url` (or, for an
/// existing project, its current image) is kept. A failed upload aborts the
/// save, and a save that fails after uploading removes the new object.
pub async fn save_project(
    State(state): State<AppState>,
    admin: AdminUser,
    multipart: Multipart,
) -> AppResult<Json<SavedResponse<Project>>> {
    let (form, upload) = read_project_form(multipart).await?;
    let valid = form.into_valid()?;

    let (uploaded, image_url) = match upload {
        Some(upload) => {
            let (path, url) = store_image(&state, upload).await?;
            (Some(path), Some(url))
        }
        None => {
            let kept = match (&valid.image_url, valid.id) {
                (Some(url), _) => Some(url.clone()),
                (None, Some(id)) => ProjectRepo::find_by_id(&state.pool, id)
                    .await?
                    .and_then(|existing| existing.image_url),
                (None, None) => None,
            };
            (None, kept)
        }
    };

    let project = match persist_project(&state, valid, image_url).await {
        Ok(project) => project,
        Err(err) => {
            // No row references the new upload.
            if let Some(path) = uploaded {
                discard_upload(&state, &path).await;
            }
            return Err(err);
        }
    };

    tracing::info!(
        admin_id = %admin.admin_id,
        project_id = %project.id,
        slug = %project.slug,
        has_image = project.image_url.is_some(),
        "Project saved"
    );

    Ok(Json(SavedResponse {
        data: project,
        redirect_to: LISTING_PATH,
    }))
}

async fn persist_project(
    state: &AppState,
    valid: ValidProject,
    image_url: Option<String>,
) -> AppResult<Project> {
    check_taxonomy(state, &valid, image_url.is_some()).await?;

    let input = UpsertProject {
        id: valid.id,
        title: valid.title,
        slug: valid.slug,
        content: valid.content,
        image_url,
        music_url: valid.music_url,
        category_id: valid.category_id,
        subcategory_id: valid.subcategory_id,
    };

    Ok(ProjectRepo::upsert(&state.pool, &input).await?)
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Deletes the row, then tries to remove its image from object storage.
/// Storage failures are logged and do not fail the request.
pub async fn delete_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = find_project(&state, id).await?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    tracing::info!(admin_id = %admin.admin_id, project_id = %id, "Project deleted");

    if let Some(stored) = project.image_url.as_deref() {
        remove_image(&state, id, stored).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Collect the multipart parts into form fields and an optional image.
async fn read_project_form(
    mut multipart: Multipart,
) -> AppResult<(ProjectForm, Option<ImageUpload>)> {
    let mut form = ProjectForm::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            // Browsers send an empty part when no file was chosen.
            if !bytes.is_empty() {
                upload = Some(ImageUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "id" => form.id = parse_id("id", &text)?,
            "title" => form.title = text,
            "slug" => form.slug = Some(text),
            "content" => form.content = Some(text),
            "music_url" => form.music_url = Some(text),
            "image_url" => form.image_url = Some(text),
            "category_id" => form.category_id = parse_id("category_id", &text)?,
            "subcategory_id" => form.subcategory_id = parse_id("subcategory_id", &text)?,
            _ => {}
        }
    }

    Ok((form, upload))
}

/// Parse an optional UUID form value; blank means absent.
fn parse_id(field: &str, value: &str) -> AppResult<Option<DbId>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid {field}: '{value}'")))
}

/// Log taxonomy and media-convention mismatches. Neither blocks the save;
/// a missing category is left to the foreign key.
async fn check_taxonomy(
    state: &AppState,
    project: &ValidProject,
    has_image: bool,
) -> AppResult<()> {
    if let Some(subcategory_id) = project.subcategory_id {
        if let Some(subcategory) = SubcategoryRepo::find_by_id(&state.pool, subcategory_id).await? {
            if subcategory.category_id != project.category_id {
                tracing::warn!(
                    slug = %project.slug,
                    %subcategory_id,
                    category_id = %project.category_id,
                    subcategory_category_id = %subcategory.category_id,
                    "Subcategory belongs to a different category"
                );
            }
        }
    }

    if let Some(category) = CategoryRepo::find_by_id(&state.pool, project.category_id).await? {
        if let Some(kind) = MediaKind::for_category(&category.slug) {
            let satisfied = kind.is_satisfied_by(
                has_image,
                project.music_url.is_some(),
                project.content.is_some(),
            );
            if !satisfied {
                tracing::debug!(
                    slug = %project.slug,
                    category = %category.slug,
                    expected = ?kind,
                    "Project does not carry its section's usual media"
                );
            }
        }
    }

    Ok(())
}

/// Sniff and upload an image, returning its object path and public URL.
async fn store_image(state: &AppState, upload: ImageUpload) -> AppResult<(String, String)> {
    let format = image::guess_format(&upload.bytes)
        .ok()
        .filter(|f| ACCEPTED_IMAGE_FORMATS.contains(f))
        .ok_or_else(|| {
            AppError::BadRequest("Image must be a PNG, JPEG, WebP or GIF file".into())
        })?;

    let path = upload_object_name(&upload.file_name, Utc::now().timestamp_millis());
    let size = upload.bytes.len();
    state
        .storage
        .upload(&path, upload.bytes, format.to_mime_type())
        .await?;

    tracing::info!(%path, size, mime = format.to_mime_type(), "Image uploaded");
    let url = state.storage.public_url(&path);
    Ok((path, url))
}

async fn discard_upload(state: &AppState, path: &str) {
    match state.storage.remove(path).await {
        Ok(()) => tracing::info!(%path, "Removed image of unsaved project"),
        Err(e) => tracing::warn!(%path, error = %e, "Failed to remove image of unsaved project"),
    }
}

async fn remove_image(state: &AppState, project_id: DbId, stored: &str) {
    let Some(path) = object_path_for(stored, state.media_base_url(), &state.config.storage.bucket)
    else {
        tracing::debug!(%project_id, image_url = stored, "Image is not in our bucket; nothing to remove");
        return;
    };

    if let Err(e) = state.storage.remove(&path).await {
        tracing::warn!(%project_id, %path, error = %e, "Failed to remove project image");
    }
}
