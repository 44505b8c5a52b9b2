//! Filesystem-backed object store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::{StorageError, StorageResult};
use crate::{check_object_path, ObjectStore};

/// Stores objects as files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    /// Open (creating if needed) the root directory.
    pub async fn new(root: impl AsRef<Path>, public_base_url: &str) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        if !fs::metadata(&root).await?.is_dir() {
            return Err(StorageError::Config(format!(
                "Storage root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn object_file(&self, path: &str) -> StorageResult<PathBuf> {
        Ok(self.root.join(check_object_path(path)?))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> StorageResult<()> {
        let file = self.object_file(path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file, bytes).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> StorageResult<()> {
        let file = self.object_file(path)?;
        match fs::remove_file(&file).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    async fn store(dir: &tempfile::TempDir) -> LocalObjectStore {
        LocalObjectStore::new(dir.path().join("media"), "http://localhost:3000/media/")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn upload_writes_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store
            .upload("public/1-a.png", b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap();

        let written = fs::read(dir.path().join("media/public/1-a.png")).await.unwrap();
        assert_eq!(written, b"png-bytes");
        assert_eq!(
            store.public_url("public/1-a.png"),
            "http://localhost:3000/media/public/1-a.png"
        );
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store
            .upload("public/2-b.webp", vec![1, 2, 3], "image/webp")
            .await
            .unwrap();

        store.remove("public/2-b.webp").await.unwrap();
        assert!(!dir.path().join("media/public/2-b.webp").exists());

        store.remove("public/2-b.webp").await.unwrap();
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        assert_matches!(
            store.upload("../escape.png", vec![0], "image/png").await,
            Err(StorageError::InvalidPath(_))
        );
    }
}
