use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::error::{CoreError, FieldErrors};
use folio_storage::StorageError;
use serde::Serialize;

/// Error type returned by every handler.
///
/// Domain, database and storage errors convert in with `?`; the remaining
/// variants are raised by handlers directly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Lookup by something other than an id (e.g. a public slug) found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// `{ "error": ..., "code": ... }`, plus `fields` for form validation errors.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a FieldErrors>,
}

/// Status, machine-readable code and client-facing message.
type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = match &self {
            AppError::Core(err) => classify_core_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Storage(err) => classify_storage_error(err),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        };

        let fields = match &self {
            AppError::Core(CoreError::InvalidFields(fields)) => Some(fields),
            _ => None,
        };

        (status, Json(ErrorBody { error, code, fields })).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::InvalidFields(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => internal(msg),
    }
}

/// Integrity violations keep the database message so the admin sees which
/// constraint failed:
///
/// - unique (23505) and foreign-key (23503) violations -> 409
/// - check violations (23514) -> 400
/// - `RowNotFound` -> 404
/// - anything else -> sanitized 500
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    let sqlx::Error::Database(db_err) = err else {
        if matches!(err, sqlx::Error::RowNotFound) {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            );
        }
        return internal(err);
    };

    match db_err.code().as_deref() {
        Some("23505" | "23503") => {
            tracing::info!(
                constraint = db_err.constraint().unwrap_or("unknown"),
                error = %db_err,
                "Integrity violation"
            );
            (StatusCode::CONFLICT, "CONFLICT", db_err.message().to_string())
        }
        Some("23514") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            db_err.message().to_string(),
        ),
        _ => internal(db_err),
    }
}

fn classify_storage_error(err: &StorageError) -> Classified {
    match err {
        StorageError::InvalidPath(path) => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Invalid object path: {path}"),
        ),
        StorageError::Backend(_) | StorageError::Io(_) => {
            tracing::error!(error = %err, "Object storage error");
            (
                StatusCode::BAD_GATEWAY,
                "STORAGE_ERROR",
                "Image upload failed".to_string(),
            )
        }
        StorageError::Config(_) => internal(err),
    }
}

/// Log the detail and hide it from the client.
fn internal(detail: &dyn Display) -> Classified {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
