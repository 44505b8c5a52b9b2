#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::auth::password::hash_password;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_db::models::admin_user::{AdminUser, CreateAdminUser};
use folio_db::repositories::AdminUserRepo;
use folio_storage::{ObjectStore, StorageBackend, StorageConfig, StorageError, StorageResult};

pub const MEDIA_BASE: &str = "https://cdn.test/storage/v1/object/public/project_images";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const BOUNDARY: &str = "folio-test-boundary";

// ---------------------------------------------------------------------------
// Object store fakes
// ---------------------------------------------------------------------------

/// In-memory object store recording uploads and removals.
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn remove(&self, path: &str) -> StorageResult<()> {
        self.objects.lock().unwrap().remove(path);
        self.removed.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn public_base_url(&self) -> &str {
        MEDIA_BASE
    }
}

/// Object store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn upload(&self, _path: &str, _bytes: Vec<u8>, _content_type: &str) -> StorageResult<()> {
        Err(StorageError::Backend("bucket unavailable".into()))
    }

    async fn remove(&self, _path: &str) -> StorageResult<()> {
        Err(StorageError::Backend("bucket unavailable".into()))
    }

    fn public_base_url(&self) -> &str {
        MEDIA_BASE
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "folio-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        storage: StorageConfig {
            bucket: "project_images".to_string(),
            public_base_url: MEDIA_BASE.to_string(),
            backend: StorageBackend::S3 {
                endpoint: None,
                region: None,
                access_key_id: None,
                secret_access_key: None,
            },
        },
    }
}

/// Full application router backed by an in-memory object store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(MemoryStore::default()))
}

/// Full application router with the given object store, using the same
/// middleware stack as production.
pub fn build_test_app_with_store(pool: PgPool, storage: Arc<dyn ObjectStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Create an admin account with [`ADMIN_PASSWORD`].
pub async fn create_admin(pool: &PgPool, email: &str) -> AdminUser {
    let input = CreateAdminUser {
        email: email.to_string(),
        password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
    };
    AdminUserRepo::create(pool, &input).await.unwrap()
}

/// Create an admin and return a valid access token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = create_admin(pool, "admin@folio.test").await;
    generate_access_token(admin.id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, request(Method::POST, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        request(Method::POST, uri, None)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// A multipart part: text field or file.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// Encode parts as a `multipart/form-data` body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap(),
    )
    .await
}

/// Smallest valid PNG header bytes; enough for format sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R',
];
