//! Integration tests for the tenancy tables (companies, users, sessions).
//!
//! Exercises the repository layer against a real database:
//! - Company creation with plan defaults
//! - Membership scoping and active-member counting
//! - Unique constraint violations
//! - Session lookup and revocation

use chrono::{Duration, Utc};
use sqlx::PgPool;
use vigia_db::models::company::{CreateCompany, UpdateCompany};
use vigia_db::models::session::CreateSession;
use vigia_db::models::user::CreateUser;
use vigia_db::repositories::{CompanyRepo, RoleRepo, SessionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_company(name: &str) -> CreateCompany {
    CreateCompany {
        name: name.to_string(),
        contact_name: None,
        contact_email: None,
        contact_phone: None,
        plan: None,
    }
}

async fn role_id(pool: &PgPool, name: &str) -> i64 {
    RoleRepo::find_by_name(pool, name)
        .await
        .expect("role lookup should succeed")
        .expect("role should be seeded")
        .id
}

fn new_user(company_id: i64, email: &str, role_id: i64) -> CreateUser {
    CreateUser {
        company_id: Some(company_id),
        full_name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fake-hash".to_string(),
        role_id,
        job_title: None,
    }
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn company_defaults_to_basic_plan(pool: PgPool) {
    let company = CompanyRepo::create(&pool, &new_company("Acme SAS"))
        .await
        .expect("create should succeed");

    assert_eq!(company.plan, "basic");
    assert!(company.is_active);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_company_name_violates_unique_constraint(pool: PgPool) {
    CompanyRepo::create(&pool, &new_company("Acme SAS"))
        .await
        .expect("first create should succeed");

    let result = CompanyRepo::create(&pool, &new_company("Acme SAS")).await;
    assert!(result.is_err(), "duplicate name must be rejected");
}

#[sqlx::test(migrations = "./migrations")]
async fn company_update_applies_only_provided_fields(pool: PgPool) {
    let company = CompanyRepo::create(&pool, &new_company("Acme SAS"))
        .await
        .unwrap();

    let updated = CompanyRepo::update(
        &pool,
        company.id,
        &UpdateCompany {
            name: None,
            contact_name: Some("Laura".to_string()),
            contact_email: None,
            contact_phone: None,
            plan: Some("premium".to_string()),
        },
    )
    .await
    .unwrap()
    .expect("row should exist");

    assert_eq!(updated.name, "Acme SAS");
    assert_eq!(updated.contact_name.as_deref(), Some("Laura"));
    assert_eq!(updated.plan, "premium");
}

#[sqlx::test(migrations = "./migrations")]
async fn deactivated_company_keeps_its_row(pool: PgPool) {
    let company = CompanyRepo::create(&pool, &new_company("Acme SAS"))
        .await
        .unwrap();

    assert!(CompanyRepo::set_active(&pool, company.id, false)
        .await
        .unwrap());

    let found = CompanyRepo::find_by_id(&pool, company.id)
        .await
        .unwrap()
        .expect("row should still exist");
    assert!(!found.is_active);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn users_are_scoped_to_their_company(pool: PgPool) {
    let worker = role_id(&pool, "worker").await;
    let a = CompanyRepo::create(&pool, &new_company("Alpha")).await.unwrap();
    let b = CompanyRepo::create(&pool, &new_company("Beta")).await.unwrap();

    UserRepo::create(&pool, &new_user(a.id, "a1@alpha.co", worker))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user(a.id, "a2@alpha.co", worker))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user(b.id, "b1@beta.co", worker))
        .await
        .unwrap();

    assert_eq!(UserRepo::list_for_company(&pool, a.id).await.unwrap().len(), 2);
    assert_eq!(UserRepo::list_for_company(&pool, b.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    let worker = role_id(&pool, "worker").await;
    let company = CompanyRepo::create(&pool, &new_company("Alpha")).await.unwrap();

    UserRepo::create(&pool, &new_user(company.id, "dup@alpha.co", worker))
        .await
        .unwrap();
    let result = UserRepo::create(&pool, &new_user(company.id, "dup@alpha.co", worker)).await;
    assert!(result.is_err(), "duplicate email must be rejected");
}

#[sqlx::test(migrations = "./migrations")]
async fn active_member_count_excludes_deactivated_users(pool: PgPool) {
    let worker = role_id(&pool, "worker").await;
    let company = CompanyRepo::create(&pool, &new_company("Alpha")).await.unwrap();

    let u1 = UserRepo::create(&pool, &new_user(company.id, "u1@alpha.co", worker))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user(company.id, "u2@alpha.co", worker))
        .await
        .unwrap();

    assert_eq!(
        UserRepo::count_active_for_company(&pool, company.id).await.unwrap(),
        2
    );

    UserRepo::set_active(&pool, u1.id, false).await.unwrap();
    assert_eq!(
        UserRepo::count_active_for_company(&pool, company.id).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn login_bookkeeping_round_trips(pool: PgPool) {
    let worker = role_id(&pool, "worker").await;
    let company = CompanyRepo::create(&pool, &new_company("Alpha")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user(company.id, "u@alpha.co", worker))
        .await
        .unwrap();

    UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    let locked_until = Utc::now() + Duration::minutes(15);
    UserRepo::lock_account(&pool, user.id, locked_until).await.unwrap();

    let loaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(loaded.failed_login_count, 2);
    assert!(loaded.locked_until.is_some());

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let loaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(loaded.failed_login_count, 0);
    assert!(loaded.locked_until.is_none());
    assert!(loaded.last_login_at.is_some());
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn revoked_session_is_not_found_by_hash(pool: PgPool) {
    let worker = role_id(&pool, "worker").await;
    let company = CompanyRepo::create(&pool, &new_company("Alpha")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user(company.id, "u@alpha.co", worker))
        .await
        .unwrap();

    let session_id = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-1".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "hash-1")
        .await
        .unwrap()
        .is_some());

    SessionRepo::revoke(&pool, session_id).await.unwrap();
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "hash-1")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_session_is_not_found_by_hash(pool: PgPool) {
    let worker = role_id(&pool, "worker").await;
    let company = CompanyRepo::create(&pool, &new_company("Alpha")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user(company.id, "u@alpha.co", worker))
        .await
        .unwrap();

    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-2".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "hash-2")
        .await
        .unwrap()
        .is_none());
}
