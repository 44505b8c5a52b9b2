use std::path::PathBuf;

use folio_core::media::PROJECT_IMAGES_BUCKET;

use crate::error::{StorageError, StorageResult};

/// Default public base URL for the local backend, served by the API itself.
const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:3000/media";

/// Default directory for the local backend.
const DEFAULT_LOCAL_DIR: &str = "./media";

/// Which object store to talk to, with backend-specific settings.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    S3 {
        /// Custom endpoint for S3-compatible services (MinIO, Supabase).
        endpoint: Option<String>,
        region: Option<String>,
        /// Static credentials; the default AWS provider chain is used when absent.
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    },
    Local {
        root: PathBuf,
    },
}

impl StorageBackend {
    /// Short backend name for logs and health output.
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::S3 { .. } => "s3",
            StorageBackend::Local { .. } => "local",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    /// Public URL of the bucket; stored image paths are joined onto it.
    pub public_base_url: String,
    pub backend: StorageBackend,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                     | Default                          |
    /// |-----------------------------|----------------------------------|
    /// | `STORAGE_BACKEND`           | `local` (`s3` or `local`)        |
    /// | `STORAGE_BUCKET`            | `project_images`                 |
    /// | `STORAGE_PUBLIC_BASE_URL`   | required for `s3`; `http://localhost:3000/media` for `local` |
    /// | `STORAGE_ENDPOINT`          | --                               |
    /// | `STORAGE_REGION`            | --                               |
    /// | `STORAGE_ACCESS_KEY_ID`     | --                               |
    /// | `STORAGE_SECRET_ACCESS_KEY` | --                               |
    /// | `STORAGE_LOCAL_DIR`         | `./media`                        |
    pub fn from_env() -> StorageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StorageResult<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bucket = var("STORAGE_BUCKET").unwrap_or_else(|| PROJECT_IMAGES_BUCKET.to_string());
        let kind = var("STORAGE_BACKEND").unwrap_or_else(|| "local".into());

        let (backend, public_base_url) = match kind.to_lowercase().as_str() {
            "s3" => {
                let public_base_url = var("STORAGE_PUBLIC_BASE_URL").ok_or_else(|| {
                    StorageError::Config("STORAGE_PUBLIC_BASE_URL must be set for s3".into())
                })?;
                let backend = StorageBackend::S3 {
                    endpoint: var("STORAGE_ENDPOINT"),
                    region: var("STORAGE_REGION"),
                    access_key_id: var("STORAGE_ACCESS_KEY_ID"),
                    secret_access_key: var("STORAGE_SECRET_ACCESS_KEY"),
                };
                (backend, public_base_url)
            }
            "local" => {
                let root = PathBuf::from(
                    var("STORAGE_LOCAL_DIR").unwrap_or_else(|| DEFAULT_LOCAL_DIR.into()),
                );
                let public_base_url = var("STORAGE_PUBLIC_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LOCAL_BASE_URL.into());
                (StorageBackend::Local { root }, public_base_url)
            }
            other => {
                return Err(StorageError::Config(format!(
                    "Invalid STORAGE_BACKEND '{other}', expected 's3' or 'local'"
                )))
            }
        };

        Ok(Self {
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            backend,
        })
    }

    /// Directory the local backend writes to, if that backend is selected.
    pub fn local_root(&self) -> Option<&PathBuf> {
        match &self.backend {
            StorageBackend::Local { root } => Some(root),
            StorageBackend::S3 { .. } => None,
        }
    }
}
