//! Admin account model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `admin_users` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// Use [`AdminUserInfo`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Safe admin representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserInfo {
    pub id: DbId,
    pub email: String,
    pub last_login_at: Option<Timestamp>,
}

impl From<&AdminUser> for AdminUserInfo {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            last_login_at: user.last_login_at,
        }
    }
}

/// DTO for creating an admin account.
#[derive(Debug)]
pub struct CreateAdminUser {
    pub email: String,
    pub password_hash: String,
}
