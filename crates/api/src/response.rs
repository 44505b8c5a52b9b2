//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Admin saves add the
//! listing path the client should return to.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "redirect_to": "/admin/..." }` returned by admin upserts.
#[derive(Debug, Serialize)]
pub struct SavedResponse<T: Serialize> {
    pub data: T,
    pub redirect_to: &'static str,
}
