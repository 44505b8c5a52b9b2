pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             signed-in account (requires auth)
///
/// /sections/{category_slug}            section projects + tabs
/// /sections/{category_slug}/slugs      section project slugs
/// /featured                            newest projects
/// /projects/{project}                  project detail (slug)
/// /projects/{project}/views            view counter (POST, id)
///
/// /admin/dashboard                     counts + recent projects
/// /admin/categories[/{id}]             list, upsert, get, delete
/// /admin/categories/{id}/subcategories subcategory choices
/// /admin/subcategories[/{id}]          list, upsert, get, delete
/// /admin/projects[/{id}]               list, multipart upsert, get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(public::router())
}
