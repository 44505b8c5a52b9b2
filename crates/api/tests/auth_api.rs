//! HTTP-level tests for admin login, token refresh, logout and lockout.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_admin, get_auth, post_json, post_json_auth, ADMIN_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_tokens_that_open_admin_routes(pool: PgPool) {
    let admin = create_admin(&pool, "studio@folio.test").await;
    let app = build_test_app(pool);

    let response = login(app.clone(), "Studio@Folio.test", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], admin.id.to_string());
    assert_eq!(json["user"]["email"], "studio@folio.test");
    assert_eq!(json["expires_in"], 15 * 60);
    assert!(json["refresh_token"].is_string());

    let token = json["access_token"].as_str().unwrap();
    let response = get_auth(app.clone(), "/api/v1/admin/categories", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["data"]["email"], "studio@folio.test");
    assert!(me["data"]["last_login_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_email_are_401(pool: PgPool) {
    create_admin(&pool, "studio@folio.test").await;
    let app = build_test_app(pool);

    let response = login(app.clone(), "studio@folio.test", "nope-nope-nope").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(app, "ghost@folio.test", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    create_admin(&pool, "studio@folio.test").await;
    let app = build_test_app(pool);

    for _ in 0..5 {
        let response = login(app.clone(), "studio@folio.test", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = login(app, "studio@folio.test", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_lock_starts_a_fresh_failure_count(pool: PgPool) {
    let admin = create_admin(&pool, "studio@folio.test").await;
    sqlx::query(
        "UPDATE admin_users
         SET failed_login_count = 5, locked_until = NOW() - INTERVAL '1 minute'
         WHERE id = $1",
    )
    .bind(admin.id)
    .execute(&pool)
    .await
    .unwrap();
    let app = build_test_app(pool.clone());

    let response = login(app.clone(), "studio@folio.test", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (failures, locked): (i32, bool) = sqlx::query_as(
        "SELECT failed_login_count, locked_until IS NOT NULL FROM admin_users WHERE id = $1",
    )
    .bind(admin.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(failures, 1);
    assert!(!locked);

    let response = login(app, "studio@folio.test", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    create_admin(&pool, "studio@folio.test").await;
    let app = build_test_app(pool);

    let json = body_json(login(app.clone(), "studio@folio.test", ADMIN_PASSWORD).await).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], json["refresh_token"]);

    // The old token was revoked by the rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_refreshes_rotate_a_token_once(pool: PgPool) {
    create_admin(&pool, "studio@folio.test").await;
    let app = build_test_app(pool);

    let json = body_json(login(app.clone(), "studio@folio.test", ADMIN_PASSWORD).await).await;
    let body = json!({ "refresh_token": json["refresh_token"] });

    let (first, second) = tokio::join!(
        post_json(app.clone(), "/api/v1/auth/refresh", body.clone()),
        post_json(app, "/api/v1/auth/refresh", body),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort_by_key(|status| status.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    create_admin(&pool, "studio@folio.test").await;
    let app = build_test_app(pool);

    let json = body_json(login(app.clone(), "studio@folio.test", ADMIN_PASSWORD).await).await;
    let access = json["access_token"].as_str().unwrap();
    let refresh_token = json["refresh_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
