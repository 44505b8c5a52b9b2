//! Admin authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// A signed-in admin, taken from `Authorization: Bearer <access token>`.
///
/// Adding this parameter to a handler makes it admin-only: requests without a
/// valid token are answered with 401 before the handler runs.
///
/// ```ignore
/// async fn delete_category(admin: AdminUser, ...) -> AppResult<StatusCode> {
///     tracing::info!(admin_id = %admin.admin_id, "Category deleted");
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub admin_id: DbId,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected admin token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(AdminUser {
            admin_id: claims.sub,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Malformed Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Expected 'Authorization: Bearer <token>'"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
