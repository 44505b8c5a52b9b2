//! HTTP-level tests for the admin CMS: auth enforcement, form validation,
//! upserts, integrity conflicts, image upload and delete cleanup.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, build_test_app_with_store, delete_auth, get,
    get_auth, post_json_auth, post_multipart_auth, FailingStore, MemoryStore, Part, MEDIA_BASE,
    PNG_BYTES,
};
use folio_core::types::DbId;
use folio_db::models::category::UpsertCategory;
use folio_db::models::project::UpsertProject;
use folio_db::repositories::{CategoryRepo, ProjectRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn category(pool: &PgPool, slug: &str) -> DbId {
    CategoryRepo::upsert(
        pool,
        &UpsertCategory {
            id: None,
            name: slug.to_uppercase(),
            slug: slug.into(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn project_with_image(pool: &PgPool, category_id: DbId, image_url: &str) -> DbId {
    ProjectRepo::upsert(
        pool,
        &UpsertProject {
            id: None,
            title: "Flower".into(),
            slug: "flower".into(),
            content: None,
            image_url: Some(image_url.into()),
            music_url: None,
            category_id,
            subcategory_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn project_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app.clone(), "/api/v1/admin/categories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get_auth(app, "/api/v1/admin/dashboard", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn category_slug_is_derived_from_name(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        json!({ "name": "Fine Art" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "fine-art");
    assert_eq!(json["redirect_to"], "/admin/categories");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_category_reports_field_errors(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        json!({ "name": "", "slug": "Bad Slug" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"], json!(["Name is required"]));
    assert!(json["fields"]["slug"].is_array());
    assert!(CategoryRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn saving_with_an_id_updates_in_place(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = category(&pool, "art").await;
    let app = build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        json!({ "id": id, "name": "Visual Art", "slug": "visual-art" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let categories = CategoryRepo::list(&pool).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, id);
    assert_eq!(categories[0].name, "Visual Art");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_slug_is_a_conflict(pool: PgPool) {
    let token = admin_token(&pool).await;
    category(&pool, "art").await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        json!({ "name": "Art" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_categories_slug"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn category_with_projects_cannot_be_deleted(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    project_with_image(&pool, art, "public/1-flower.png").await;
    let app = build_test_app(pool);

    let response = delete_auth(app, &format!("/api/v1/admin/categories/{art}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subcategory_requires_a_parent(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/subcategories",
        json!({ "name": "Canvas" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["fields"]["category_id"],
        json!(["Please select a parent category"])
    );
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn project_save_uploads_the_image(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let store = Arc::new(MemoryStore::default());
    let app = build_test_app_with_store(pool.clone(), store.clone());

    let art_id = art.to_string();
    let response = post_multipart_auth(
        app,
        "/api/v1/admin/projects",
        &[
            Part::Text("title", "Pink Flower"),
            Part::Text("category_id", &art_id),
            Part::Text("subcategory_id", ""),
            Part::Text("music_url", ""),
            Part::File {
                name: "image",
                file_name: "pink flower.png",
                content_type: "image/png",
                bytes: PNG_BYTES,
            },
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["redirect_to"], "/admin/projects");
    assert_eq!(json["data"]["slug"], "pink-flower");
    assert_eq!(json["data"]["subcategory_id"], serde_json::Value::Null);

    let image_url = json["data"]["image_url"].as_str().unwrap();
    assert!(image_url.starts_with(&format!("{MEDIA_BASE}/public/")));
    assert!(image_url.ends_with("-pink-flower.png"));

    let objects = store.objects.lock().unwrap();
    assert_eq!(objects.len(), 1);
    let (bytes, content_type) = objects.values().next().unwrap();
    assert_eq!(bytes.as_slice(), PNG_BYTES);
    assert_eq!(content_type, "image/png");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejected_project_save_removes_its_upload(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let store = Arc::new(MemoryStore::default());
    let app = build_test_app_with_store(pool.clone(), store.clone());

    let art_id = art.to_string();
    let parts = [
        Part::Text("title", "Flower"),
        Part::Text("category_id", &art_id),
        Part::File {
            name: "image",
            file_name: "a.png",
            content_type: "image/png",
            bytes: PNG_BYTES,
        },
    ];

    let response = post_multipart_auth(app.clone(), "/api/v1/admin/projects", &parts, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;

    // Same title, so the derived slug collides.
    let response = post_multipart_auth(app, "/api/v1/admin/projects", &parts, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let objects = store.objects.lock().unwrap();
    assert_eq!(objects.len(), 1);
    let kept = objects.keys().next().unwrap();
    assert_eq!(
        first["data"]["image_url"].as_str().unwrap(),
        format!("{MEDIA_BASE}/{kept}")
    );
    assert_eq!(store.removed.lock().unwrap().len(), 1);
    assert_eq!(project_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn project_save_without_file_keeps_existing_image(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let stored = format!("{MEDIA_BASE}/public/1-flower.png");
    let id = project_with_image(&pool, art, &stored).await;
    let app = build_test_app(pool.clone());

    let (id_text, art_id) = (id.to_string(), art.to_string());
    let response = post_multipart_auth(
        app,
        "/api/v1/admin/projects",
        &[
            Part::Text("id", &id_text),
            Part::Text("title", "Flower (2024)"),
            Part::Text("slug", "flower"),
            Part::Text("category_id", &art_id),
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.title, "Flower (2024)");
    assert_eq!(project.image_url.as_deref(), Some(stored.as_str()));
    assert_eq!(project_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_image_upload_is_rejected_before_saving(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let store = Arc::new(MemoryStore::default());
    let app = build_test_app_with_store(pool.clone(), store.clone());

    let art_id = art.to_string();
    let response = post_multipart_auth(
        app,
        "/api/v1/admin/projects",
        &[
            Part::Text("title", "Notes"),
            Part::Text("category_id", &art_id),
            Part::File {
                name: "image",
                file_name: "notes.png",
                content_type: "image/png",
                bytes: b"just some text",
            },
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(project_count(&pool).await, 0);
    assert!(store.objects.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_upload_aborts_the_save(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let app = build_test_app_with_store(pool.clone(), Arc::new(FailingStore));

    let art_id = art.to_string();
    let response = post_multipart_auth(
        app,
        "/api/v1/admin/projects",
        &[
            Part::Text("title", "Flower"),
            Part::Text("category_id", &art_id),
            Part::File {
                name: "image",
                file_name: "flower.png",
                content_type: "image/png",
                bytes: PNG_BYTES,
            },
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "STORAGE_ERROR");
    assert_eq!(project_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_project_is_rejected_before_upload(pool: PgPool) {
    let token = admin_token(&pool).await;
    let store = Arc::new(MemoryStore::default());
    let app = build_test_app_with_store(pool, store.clone());

    let response = post_multipart_auth(
        app,
        "/api/v1/admin/projects",
        &[
            Part::Text("title", ""),
            Part::Text("music_url", "not a url"),
            Part::File {
                name: "image",
                file_name: "flower.png",
                content_type: "image/png",
                bytes: PNG_BYTES,
            },
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fields = body_json(response).await["fields"].clone();
    assert!(fields["title"].is_array());
    assert!(fields["music_url"].is_array());
    assert!(fields["category_id"].is_array());
    assert!(store.objects.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_project_removes_its_image(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let id = project_with_image(&pool, art, &format!("{MEDIA_BASE}/public/1-flower.png")).await;
    let store = Arc::new(MemoryStore::default());
    let app = build_test_app_with_store(pool.clone(), store.clone());

    let response = delete_auth(app, &format!("/api/v1/admin/projects/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(project_count(&pool).await, 0);
    assert_eq!(*store.removed.lock().unwrap(), ["public/1-flower.png"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn project_delete_succeeds_when_storage_removal_fails(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    let id = project_with_image(&pool, art, &format!("{MEDIA_BASE}/public/1-flower.png")).await;
    let app = build_test_app_with_store(pool.clone(), Arc::new(FailingStore));

    let response = delete_auth(app, &format!("/api/v1/admin/projects/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(project_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_missing_project_is_404(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = build_test_app(pool);

    let uri = format!("/api/v1/admin/projects/{}", folio_core::types::new_id());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_counts_content(pool: PgPool) {
    let token = admin_token(&pool).await;
    let art = category(&pool, "art").await;
    category(&pool, "music").await;
    project_with_image(&pool, art, "public/1-flower.png").await;
    let app = build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["counts"]["projects"], 1);
    assert_eq!(data["counts"]["categories"], 2);
    assert_eq!(data["counts"]["subcategories"], 0);
    assert_eq!(data["recent_projects"][0]["title"], "Flower");
}
