//! Object storage for uploaded project images.
//!
//! - [`ObjectStore`] -- the async interface handlers depend on.
//! - [`s3::S3ObjectStore`] -- any S3-compatible bucket (AWS, MinIO, Supabase).
//! - [`local::LocalObjectStore`] -- a directory on disk, for development.
//! - [`config::StorageConfig`] -- backend selection from the environment.

use std::sync::Arc;

use async_trait::async_trait;

pub mod config;
pub mod error;
pub mod local;
pub mod s3;

pub use config::{StorageBackend, StorageConfig};
pub use error::{StorageError, StorageResult};

/// A bucket of publicly readable objects addressed by relative path.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `path`, replacing any existing object.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<()>;

    /// Remove the object at `path`. Removing a missing object is not an error.
    async fn remove(&self, path: &str) -> StorageResult<()>;

    /// Base URL under which every object is publicly readable.
    fn public_base_url(&self) -> &str;

    /// Absolute public URL of the object at `path`.
    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Build the configured backend.
pub async fn connect(config: &StorageConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    match &config.backend {
        StorageBackend::S3 {
            endpoint,
            region,
            access_key_id,
            secret_access_key,
        } => {
            let store = s3::S3ObjectStore::connect(
                &config.bucket,
                &config.public_base_url,
                endpoint.as_deref(),
                region.as_deref(),
                access_key_id.as_deref().zip(secret_access_key.as_deref()),
            )
            .await;
            tracing::info!(bucket = %config.bucket, "Using S3 object storage");
            Ok(Arc::new(store))
        }
        StorageBackend::Local { root } => {
            let store = local::LocalObjectStore::new(root, &config.public_base_url).await?;
            tracing::info!(root = %root.display(), "Using local object storage");
            Ok(Arc::new(store))
        }
    }
}

/// Reject object paths that could escape the bucket root.
pub(crate) fn check_object_path(path: &str) -> StorageResult<&str> {
    let trimmed = path.trim_start_matches('/');
    let escapes = trimmed
        .split(['/', '\\'])
        .any(|segment| segment == ".." || segment.is_empty());
    if trimmed.is_empty() || escapes {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(trimmed)
}
