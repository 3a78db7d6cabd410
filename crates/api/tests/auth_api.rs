//! HTTP-level integration tests for auth and membership endpoints.
//!
//! Tests cover login, token refresh rotation, logout, RBAC enforcement,
//! tenant isolation, plan limits, and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, seed_company, seed_user, token_for};
use sqlx::PgPool;

/// Log in a user via the API and return the JSON response body.
async fn login(pool: &PgPool, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_tokens_and_user_info(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, password) = seed_user(&pool, Some(company), "ana@alpha.co", "company_admin").await;

    let (status, json) = login(&pool, "ana@alpha.co", &password).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "company_admin");
    assert_eq!(json["user"]["company_id"], company);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    seed_user(&pool, Some(company), "ana@alpha.co", "worker").await;

    let (status, json) = login(&pool, "ana@alpha.co", "not-the-password").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn five_failed_logins_lock_the_account(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (_, password) = seed_user(&pool, Some(company), "ana@alpha.co", "worker").await;

    for _ in 0..5 {
        let (status, _) = login(&pool, "ana@alpha.co", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is rejected while locked.
    let (status, json) = login(&pool, "ana@alpha.co", &password).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].as_str().unwrap().contains("locked"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_user_cannot_login(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, password) = seed_user(&pool, Some(company), "ana@alpha.co", "worker").await;
    vigia_db::repositories::UserRepo::set_active(&pool, user.id, false)
        .await
        .unwrap();

    let (status, _) = login(&pool, "ana@alpha.co", &password).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh rotation + logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (_, password) = seed_user(&pool, Some(company), "ana@alpha.co", "worker").await;
    let (_, json) = login(&pool, "ana@alpha.co", &password).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert!(rotated["refresh_token"].is_string());

    // Replaying the old token fails: it was revoked on rotation.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_all_sessions(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (_, password) = seed_user(&pool, Some(company), "ana@alpha.co", "worker").await;
    let (_, json) = login(&pool, "ana@alpha.co", &password).await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/auth/logout", &access, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// RBAC + tenancy on membership endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn worker_cannot_list_users(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (worker, _) = seed_user(&pool, Some(company), "w@alpha.co", "worker").await;
    let token = token_for(&worker, "worker");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn company_admin_sees_only_own_company_members(pool: PgPool) {
    let alpha = seed_company(&pool, "Alpha").await;
    let beta = seed_company(&pool, "Beta").await;
    let (admin, _) = seed_user(&pool, Some(alpha), "admin@alpha.co", "company_admin").await;
    seed_user(&pool, Some(alpha), "w@alpha.co", "worker").await;
    seed_user(&pool, Some(beta), "w@beta.co", "worker").await;

    let token = token_for(&admin, "company_admin");
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let emails: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails.len(), 2);
    assert!(!emails.contains(&"w@beta.co"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn membership_creation_enforces_the_plan_limit(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await; // basic plan: 10 users
    let (admin, _) = seed_user(&pool, Some(company), "admin@alpha.co", "company_admin").await;
    for i in 0..9 {
        seed_user(&pool, Some(company), &format!("w{i}@alpha.co"), "worker").await;
    }
    let token = token_for(&admin, "company_admin");

    // The 11th active member exceeds the basic plan.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &token,
        serde_json::json!({
            "full_name": "Uno Demasiado",
            "email": "extra@alpha.co",
            "password": "long-enough-password",
            "role": "worker",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn created_membership_cannot_be_super_admin(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (admin, _) = seed_user(&pool, Some(company), "admin@alpha.co", "company_admin").await;
    let token = token_for(&admin, "company_admin");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &token,
        serde_json::json!({
            "full_name": "Escalador",
            "email": "esc@alpha.co",
            "password": "long-enough-password",
            "role": "super_admin",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_maps_to_conflict(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (admin, _) = seed_user(&pool, Some(company), "admin@alpha.co", "company_admin").await;
    seed_user(&pool, Some(company), "dup@alpha.co", "worker").await;
    let token = token_for(&admin, "company_admin");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &token,
        serde_json::json!({
            "full_name": "Duplicado",
            "email": "dup@alpha.co",
            "password": "long-enough-password",
            "role": "worker",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}
