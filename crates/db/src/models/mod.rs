//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - An upsert DTO the API layer builds from validated form input

pub mod admin_user;
pub mod category;
pub mod dashboard;
pub mod project;
pub mod session;
pub mod subcategory;
