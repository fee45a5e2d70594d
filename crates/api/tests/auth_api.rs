//! HTTP-level tests for registration, login, token refresh, logout and the
//! `/me` endpoints.

mod common;

use acordeon_db::repositories::ProfileRepo;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json, put_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

fn registration(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": "clave123",
        "confirm_password": "clave123",
        "display_name": "Ana Pérez",
        "phone": "+34 611 222 333",
    })
}

async fn login(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_student_and_signs_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/auth/register", registration("Ana@Test.com")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["email"], "ana@test.com");
    assert_eq!(json["user"]["role"], "student");
    assert_eq!(json["user"]["display_name"], "Ana Pérez");
    assert_eq!(json["redirect_to"], "/dashboard");

    let stored = ProfileRepo::find_by_email(&pool, "ana@test.com")
        .await
        .unwrap()
        .expect("profile should exist");
    assert_eq!(stored.phone.as_deref(), Some("+34 611 222 333"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_mismatched_passwords(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = registration("ana@test.com");
    body["confirm_password"] = json!("otra-clave");

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Las contraseñas no coinciden.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_requires_every_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = registration("ana@test.com");
    body["phone"] = json!("   ");

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_is_conflict(pool: PgPool) {
    common::create_student(&pool, "ana@test.com").await;
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/register", registration("ANA@test.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn master_login_lands_on_admin(pool: PgPool) {
    let master = common::create_master(&pool).await;
    let app = common::build_test_app(pool);

    let json = login(app, "maestro@test.com", TEST_PASSWORD).await;
    assert_eq!(json["user"]["id"], master.id);
    assert_eq!(json["user"]["role"], "master");
    assert_eq!(json["redirect_to"], "/admin/dashboard");
    assert!(json["expires_in"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    common::create_student(&pool, "ana@test.com").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ana@test.com", "password": "incorrecta" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nadie@test.com", "password": "loquesea" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_inactive_profile_is_forbidden(pool: PgPool) {
    let student = common::create_student(&pool, "ana@test.com").await;
    sqlx::query("UPDATE profiles SET is_active = false WHERE id = $1")
        .bind(student.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ana@test.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_token(pool: PgPool) {
    common::create_student(&pool, "ana@test.com").await;
    let json = login(common::build_test_app(pool.clone()), "ana@test.com", TEST_PASSWORD).await;
    let original = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), original);

    // The old token was revoked on use.
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_refresh_of_one_token_issues_one_pair(pool: PgPool) {
    common::create_student(&pool, "ana@test.com").await;

    for _ in 0..4 {
        let json = login(common::build_test_app(pool.clone()), "ana@test.com", TEST_PASSWORD).await;
        let token = json["refresh_token"].as_str().unwrap().to_string();

        let mut set = tokio::task::JoinSet::new();
        for _ in 0..4 {
            let app = common::build_test_app(pool.clone());
            let token = token.clone();
            set.spawn(async move {
                post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": token }))
                    .await
                    .status()
            });
        }

        let mut ok = 0;
        while let Some(status) = set.join_next().await {
            let status = status.unwrap();
            if status == StatusCode::OK {
                ok += 1;
            } else {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
            }
        }
        assert_eq!(ok, 1);
    }

    // Each round's winner holds the only live session from that round.
    let live: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sessions s JOIN profiles p ON p.id = s.user_id \
         WHERE p.email = 'ana@test.com' AND s.is_revoked = false",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(live, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_with_garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": "no-es-un-token" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    common::create_student(&pool, "ana@test.com").await;
    let json = login(common::build_test_app(pool.clone()), "ana@test.com", TEST_PASSWORD).await;
    let access = json["access_token"].as_str().unwrap();
    let refresh = json["refresh_token"].as_str().unwrap();

    let response =
        post_auth(common::build_test_app(pool.clone()), "/api/v1/auth/logout", access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// /me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_rejects_tampered_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_profile_without_hash(pool: PgPool) {
    let student = common::create_student(&pool, "ana@test.com").await;
    let token = common::token_for(&student);

    let response = get_auth(common::build_test_app(pool), "/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "ana@test.com");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_me_keeps_name_when_blank(pool: PgPool) {
    let student = common::create_student(&pool, "ana@test.com").await;
    let token = common::token_for(&student);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/me",
        json!({ "display_name": "  ", "avatar_url": "https://cdn.test/ana.png" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["display_name"], "ana");
    assert_eq!(json["data"]["avatar_url"], "https://cdn.test/ana.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_then_login_with_new_one(pool: PgPool) {
    let student = common::create_student(&pool, "ana@test.com").await;
    let token = common::token_for(&student);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/me/password",
        json!({ "new_password": "nueva-clave", "confirm_password": "nueva-clave" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    login(common::build_test_app(pool), "ana@test.com", "nueva-clave").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_rejects_short_password(pool: PgPool) {
    let student = common::create_student(&pool, "ana@test.com").await;
    let token = common::token_for(&student);

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/me/password",
        json!({ "new_password": "abc", "confirm_password": "abc" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
