//! HTTP-level integration tests for the calendar and export endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get_auth, post_json_auth, seed_company, seed_user, token_for};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn january_2024_flags_new_year_and_shifted_epiphany(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "w@alpha.co", "worker").await;
    let token = token_for(&user, "worker");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/calendar/holidays?year=2024&month=0", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([1, 8]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn may_2025_keeps_labour_day_on_the_first(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "w@alpha.co", "worker").await;
    let token = token_for(&user, "worker");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/calendar/holidays?year=2025&month=4", &token).await;
    let json = body_json(response).await;
    let days: Vec<u32> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_u64().unwrap() as u32)
        .collect();
    assert!(days.contains(&1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_year_is_rejected(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "w@alpha.co", "worker").await;
    let token = token_for(&user, "worker");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/calendar/holidays?year=1800&month=0", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn exporting_zero_records_signals_no_data(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "osh@alpha.co", "osh_responsible").await;
    let token = token_for(&user, "osh_responsible");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/exports/incidents", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("No records"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn csv_export_has_one_row_per_record_plus_header(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "osh@alpha.co", "osh_responsible").await;
    let token = token_for(&user, "osh_responsible");

    for location in ["Bodega 1", "Patio", "Laboratorio"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/incidents",
            &token,
            serde_json::json!({ "location": location }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/exports/incidents", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let text = body_text(response).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4, "header + 3 records");
    assert!(lines[0].starts_with("Lugar,"));
    // Location is uppercased; missing date renders the placeholder.
    assert!(text.contains("BODEGA 1"));
    assert!(text.contains("---"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn json_export_returns_headers_and_rows(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "osh@alpha.co", "osh_responsible").await;
    let token = token_for(&user, "osh_responsible");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/work-plan",
        &token,
        serde_json::json!({ "title": "Simulacro", "scheduled_on": "2024-09-15" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/exports/work-plan?format=json", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["headers"][0], "Actividad");
    let rows = json["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Simulacro");
    assert_eq!(rows[0][6], "2024-09-15");
    assert_eq!(rows[0][8], "Planeada");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_export_format_is_rejected(pool: PgPool) {
    let company = seed_company(&pool, "Alpha").await;
    let (user, _) = seed_user(&pool, Some(company), "osh@alpha.co", "osh_responsible").await;
    let token = token_for(&user, "osh_responsible");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/incidents",
        &token,
        serde_json::json!({ "location": "Bodega 1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/exports/incidents?format=xml", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Unknown format"));
}
