use std::sync::Arc;

use folio_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and cloned per request; every field is behind an
/// `Arc` or is already a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Object store holding project images.
    pub storage: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Public base URL that relative image paths are resolved against.
    pub fn media_base_url(&self) -> &str {
        self.storage.public_base_url()
    }
}
