//! Request extractors enforcing authentication.
//!
//! - [`auth::AdminUser`] -- the signed-in admin, from a JWT Bearer token.

pub mod auth;
