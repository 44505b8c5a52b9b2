//! S3-compatible object store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::error::{StorageError, StorageResult};
use crate::{check_object_path, ObjectStore};

/// Region used when none is configured; S3-compatible services ignore it.
const FALLBACK_REGION: &str = "us-east-1";

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    /// Build a client from the default AWS configuration chain, overriding
    /// region, endpoint and credentials where given.
    ///
    /// A custom endpoint switches to path-style addressing, which MinIO and
    /// Supabase storage require.
    pub async fn connect(
        bucket: &str,
        public_base_url: &str,
        endpoint: Option<&str>,
        region: Option<&str>,
        credentials: Option<(&str, &str)>,
    ) -> Self {
        let region = Region::new(region.unwrap_or(FALLBACK_REGION).to_string());
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        if let Some((key_id, secret)) = credentials {
            builder = builder.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "folio-storage",
            ));
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<()> {
        let key = check_object_path(path)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("PutObject {key}: {e}")))?;
        tracing::debug!(bucket = %self.bucket, key, "Uploaded object");
        Ok(())
    }

    async fn remove(&self, path: &str) -> StorageResult<()> {
        let key = check_object_path(path)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("DeleteObject {key}: {e}")))?;
        tracing::debug!(bucket = %self.bucket, key, "Removed object");
        Ok(())
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}
