//! Anonymous routes backing the public site.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET  /sections/{category_slug}        -> get_section
/// GET  /sections/{category_slug}/slugs  -> list_section_slugs
/// GET  /featured                        -> list_featured
/// GET  /projects/{project}              -> get_project (by slug)
/// POST /projects/{project}/views        -> record_view (by id)
/// ```
///
/// Both project routes share one placeholder name, which the router requires
/// for routes that diverge after the same segment.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sections/{category_slug}", get(public::get_section))
        .route(
            "/sections/{category_slug}/slugs",
            get(public::list_section_slugs),
        )
        .route("/featured", get(public::list_featured))
        .route("/projects/{project}", get(public::get_project))
        .route("/projects/{project}/views", post(public::record_view))
}
