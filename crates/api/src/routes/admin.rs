//! Route definitions for the admin CMS. Every handler requires an
//! [`AdminUser`](crate::middleware::auth::AdminUser).

use axum::routing::get;
use axum::Router;

use crate::handlers::{categories, dashboard, projects, subcategories};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET             /dashboard
/// GET, POST       /categories
/// GET, DELETE     /categories/{id}
/// GET             /categories/{id}/subcategories
/// GET, POST       /subcategories
/// GET, DELETE     /subcategories/{id}
/// GET, POST       /projects                (POST is multipart)
/// GET, DELETE     /projects/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::save_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category).delete(categories::delete_category),
        )
        .route(
            "/categories/{id}/subcategories",
            get(categories::list_category_subcategories),
        )
        .route(
            "/subcategories",
            get(subcategories::list_subcategories).post(subcategories::save_subcategory),
        )
        .route(
            "/subcategories/{id}",
            get(subcategories::get_subcategory).delete(subcategories::delete_subcategory),
        )
        .route(
            "/projects",
            get(projects::list_projects).post(projects::save_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project).delete(projects::delete_project),
        )
}
