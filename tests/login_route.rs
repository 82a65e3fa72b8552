//! Login flow integration tests. These provision a disposable Postgres
//! container, so they are ignored by default; run them with
//! `cargo test -- --ignored` on a machine with a Docker daemon.

use agency_api::auth::routes::{login, login_form, logout};
use agency_api::test_support::{
    TestDatabase, TestFixtures, TestRocketBuilder, test_auth_config, test_auth_state,
};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use rocket::routes;
use rocket::serde::json::json;

const SECRET: &str = "login-test-secret";

async fn login_client(test_db: &TestDatabase) -> Client {
    let state = test_auth_state(test_auth_config(SECRET));
    let rocket = TestRocketBuilder::new()
        .manage_pg_pool(test_db.pool_clone())
        .manage_auth_state(state)
        .mount_admin_routes(routes![login, login_form, logout])
        .build();

    Client::tracked(rocket).await.expect("valid rocket instance")
}

async fn seed_admin(test_db: &TestDatabase) {
    let state = test_auth_state(test_auth_config(SECRET));
    let hash = state
        .passwords
        .hash_password("admin123")
        .expect("hash password");

    TestFixtures::new(test_db.pool())
        .insert_user("admin@example.com", Some("Site Admin"), "admin", Some(&hash))
        .await
        .expect("insert admin user");
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn json_login_sets_session_cookie_and_omits_secrets() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    let response = client
        .post("/admin/login")
        .header(ContentType::JSON)
        .body(json!({"email": "admin@example.com", "password": "admin123"}).to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let cookie = response
        .cookies()
        .get("agency_session")
        .expect("session cookie set");
    assert!(!cookie.value().is_empty());

    let body = response.into_string().await.expect("body");
    assert!(body.contains("admin@example.com"));
    assert!(!body.to_lowercase().contains("password"));
    assert!(!body.contains("$argon2"));
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    let wrong_password = client
        .post("/admin/login")
        .header(ContentType::JSON)
        .body(json!({"email": "admin@example.com", "password": "nope"}).to_string())
        .dispatch()
        .await;
    let wrong_status = wrong_password.status();
    let wrong_body = wrong_password.into_string().await.expect("body");

    let unknown_email = client
        .post("/admin/login")
        .header(ContentType::JSON)
        .body(json!({"email": "ghost@example.com", "password": "nope"}).to_string())
        .dispatch()
        .await;
    let unknown_status = unknown_email.status();
    let unknown_body = unknown_email.into_string().await.expect("body");

    assert_eq!(wrong_status, Status::Unauthorized);
    assert_eq!(unknown_status, Status::Unauthorized);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn account_without_stored_password_cannot_log_in() {
    let test_db = TestDatabase::new().await.expect("test database");
    TestFixtures::new(test_db.pool())
        .insert_user("sso-only@example.com", None, "editor", None)
        .await
        .expect("insert passwordless user");
    let client = login_client(&test_db).await;

    let response = client
        .post("/admin/login")
        .header(ContentType::JSON)
        .body(json!({"email": "sso-only@example.com", "password": "anything"}).to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn missing_credentials_get_the_same_generic_rejection() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    let response = client
        .post("/admin/login")
        .header(ContentType::JSON)
        .body(json!({"email": "", "password": ""}).to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Unauthorized);
    let body = response.into_string().await.expect("body");
    assert!(body.contains("invalid credentials"));
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn form_login_redirects_to_the_callback_target() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    let response = client
        .post("/admin/login")
        .header(ContentType::Form)
        .body("email=admin%40example.com&password=admin123&callbackUrl=%2Fadmin%2Fclients")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/admin/clients")
    );
    assert!(response.cookies().get("agency_session").is_some());
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn form_login_rejects_external_callback_targets() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    let response = client
        .post("/admin/login")
        .header(ContentType::Form)
        .body("email=admin%40example.com&password=admin123&callbackUrl=https%3A%2F%2Fevil.example")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/admin"));
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn failed_form_login_bounces_back_with_error_flag() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    let response = client
        .post("/admin/login")
        .header(ContentType::Form)
        .body("email=admin%40example.com&password=wrong")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/admin/login?error=1")
    );
}

#[tokio::test]
#[ignore = "provisions a Postgres container; requires a Docker daemon"]
async fn logout_clears_the_session_cookie() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = login_client(&test_db).await;

    client
        .post("/admin/login")
        .header(ContentType::JSON)
        .body(json!({"email": "admin@example.com", "password": "admin123"}).to_string())
        .dispatch()
        .await;

    let response = client.post("/admin/logout").dispatch().await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/admin/login")
    );

    let removal = response
        .cookies()
        .get("agency_session")
        .expect("removal cookie present");
    assert!(removal.value().is_empty());
}
