use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vigia_api::auth::jwt::{generate_access_token, JwtConfig};
use vigia_api::auth::password::hash_password;
use vigia_api::config::ServerConfig;
use vigia_api::router::build_app_router;
use vigia_api::state::AppState;
use vigia_api::storage::LocalEvidenceStore;
use vigia_api::ws::WsManager;
use vigia_db::models::company::CreateCompany;
use vigia_db::models::user::{CreateUser, User};
use vigia_db::repositories::{CompanyRepo, RoleRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed JWT secret so tests can mint
/// their own tokens.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        evidence_dir: std::env::temp_dir().join(format!("vigia-test-{}", uuid::Uuid::new_v4())),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let ws_manager = Arc::new(WsManager::new());
    let evidence_store = Arc::new(LocalEvidenceStore::new(config.evidence_dir.clone()));
    let event_bus = Arc::new(vigia_events::EventBus::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager,
        evidence_store,
        event_bus,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a company directly in the database, returning its id.
pub async fn seed_company(pool: &PgPool, name: &str) -> i64 {
    CompanyRepo::create(
        pool,
        &CreateCompany {
            name: name.to_string(),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            plan: None,
        },
    )
    .await
    .expect("company creation should succeed")
    .id
}

/// Create a user directly in the database and return the row plus the
/// plaintext password used.
pub async fn seed_user(
    pool: &PgPool,
    company_id: Option<i64>,
    email: &str,
    role_name: &str,
) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .expect("role lookup should succeed")
        .expect("role should be seeded");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            company_id,
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hashed,
            role_id: role.id,
            job_title: None,
        },
    )
    .await
    .expect("user creation should succeed");
    (user, password.to_string())
}

/// Mint an access token for a seeded user without going through login.
pub fn token_for(user: &User, role: &str) -> String {
    generate_access_token(user.id, role, user.company_id, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request without authentication.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue a GET request with a Bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue a JSON POST without authentication.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue a JSON POST with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue a JSON PUT with a Bearer token.
pub async fn put_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue a DELETE with a Bearer token.
pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue a multipart POST with a Bearer token.
///
/// `parts` is a list of `(field_name, file_name, bytes)` tuples.
pub async fn post_multipart_auth(
    app: Router,
    path: &str,
    token: &str,
    parts: &[(&str, &str, &[u8])],
) -> Response<Body> {
    const BOUNDARY: &str = "vigia-test-boundary";

    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Collect a response body as a UTF-8 string (CSV exports).
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}
