pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod projects;
pub mod public;
pub mod subcategories;
