#![allow(dead_code)]

use std::sync::Arc;

use acordeon_api::auth::jwt::{generate_access_token, JwtConfig};
use acordeon_api::auth::password::hash_password;
use acordeon_api::config::{BunnyConfig, ServerConfig};
use acordeon_api::router::build_app_router;
use acordeon_api::state::AppState;
use acordeon_api::storage::LocalThumbnailStore;
use acordeon_bunny::BunnyStreamApi;
use acordeon_core::roles::{ROLE_MASTER, ROLE_STUDENT};
use acordeon_core::types::DbId;
use acordeon_db::models::course::{Course, CreateCourse};
use acordeon_db::models::course_module::{CourseModule, CreateCourseModule};
use acordeon_db::models::lesson::{CreateLesson, Lesson};
use acordeon_db::models::profile::{CreateProfile, Profile};
use acordeon_db::repositories::{
    CourseModuleRepo, CourseRepo, EnrollmentRepo, LessonRepo, ProfileRepo,
};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secreto123";
pub const TEST_SECURITY_KEY: &str = "test-security-key";
pub const TEST_LIBRARY_ID: &str = "4242";

/// Build a test `ServerConfig` with safe defaults and no video credentials.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        thumbnail_dir: std::env::temp_dir().join("acordeon-test-thumbnails"),
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        bunny: BunnyConfig::default(),
    }
}

/// `test_config` with playback signing enabled.
pub fn signing_config() -> ServerConfig {
    let mut config = test_config();
    config.bunny.signing.security_key = Some(TEST_SECURITY_KEY.to_string());
    config.bunny.signing.library_id = Some(TEST_LIBRARY_ID.to_string());
    config
}

/// Build the full application router for `pool` with [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the full application router with a custom configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        bunny: Arc::new(BunnyStreamApi::new(config.bunny.api_url.clone())),
        thumbnails: Arc::new(LocalThumbnailStore::new(config.thumbnail_dir.clone())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a profile with [`TEST_PASSWORD`].
pub async fn create_profile(pool: &PgPool, email: &str, role: &str) -> Profile {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
            display_name: Some(email.split('@').next().unwrap_or(email).to_string()),
            phone: Some("+34 600 000 000".to_string()),
        },
    )
    .await
    .expect("profile creation should succeed")
}

pub async fn create_master(pool: &PgPool) -> Profile {
    create_profile(pool, "maestro@test.com", ROLE_MASTER).await
}

pub async fn create_student(pool: &PgPool, email: &str) -> Profile {
    create_profile(pool, email, ROLE_STUDENT).await
}

/// Sign an access token directly, bypassing the login route.
pub fn token_for(profile: &Profile) -> String {
    generate_access_token(profile.id, &profile.role, &test_config().jwt)
        .expect("token signing should succeed")
}

pub async fn create_course(pool: &PgPool, slug: &str, published: bool) -> Course {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            title: format!("Curso {slug}"),
            slug: slug.to_string(),
            description: "Aprende acordeón desde cero".to_string(),
            thumbnail_url: "https://cdn.test/thumbnails/curso.jpg".to_string(),
            payment_link: None,
        },
    )
    .await
    .expect("course creation should succeed");

    if published {
        CourseRepo::publish(pool, course.id)
            .await
            .expect("publish should succeed")
            .expect("course should exist")
    } else {
        course
    }
}

pub async fn create_module(pool: &PgPool, course_id: DbId, order_index: i32) -> CourseModule {
    CourseModuleRepo::create(
        pool,
        &CreateCourseModule {
            course_id,
            title: format!("Módulo {order_index}"),
            order_index,
        },
    )
    .await
    .expect("module creation should succeed")
}

pub async fn create_lesson(
    pool: &PgPool,
    module_id: DbId,
    order_index: i32,
    days_to_unlock: i32,
) -> Lesson {
    LessonRepo::create(
        pool,
        &CreateLesson {
            module_id,
            title: format!("Lección {order_index}"),
            description: "Contenido de la lección".to_string(),
            days_to_unlock,
            order_index,
        },
    )
    .await
    .expect("lesson creation should succeed")
}

/// Enroll `user_id`, backdating the enrollment by `days_ago` days.
pub async fn enroll(pool: &PgPool, user_id: DbId, course_id: DbId, days_ago: i32) {
    let enrollment = EnrollmentRepo::create(pool, user_id, course_id)
        .await
        .expect("enrollment should succeed");
    sqlx::query(
        "UPDATE enrollments SET created_at = NOW() - make_interval(days => $1) WHERE id = $2",
    )
    .bind(days_ago)
    .bind(enrollment.id)
    .execute(pool)
    .await
    .expect("backdating should succeed");
}
