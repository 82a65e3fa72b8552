//! End-to-end coverage of the admin access gate: every request to a guarded
//! path resolves to render, redirect-to-login, or redirect-away. These tests
//! need no database; session validity is decided purely from the cookie.

use agency_api::auth::{Identity, Role};
use agency_api::routes::pages;
use agency_api::test_support::{TestRocketBuilder, test_auth_config, test_auth_state};
use base64::Engine;
use rocket::http::{Cookie, Status};
use rocket::local::blocking::{Client, LocalResponse};
use rocket::routes;

const SECRET: &str = "gate-test-secret";

fn gate_client() -> Client {
    let state = test_auth_state(test_auth_config(SECRET));
    TestRocketBuilder::new()
        .mount_admin_routes(routes![
            pages::admin_home,
            pages::admin_page,
            pages::login_page,
        ])
        .manage_auth_state(state)
        .blocking_client()
}

fn session_cookie_for(role: Role) -> Cookie<'static> {
    let state = test_auth_state(test_auth_config(SECRET));
    let identity = Identity {
        id: 1,
        name: None,
        email: "user@example.com".into(),
        role,
    };
    let token = state.tokens.issue(&identity).expect("issue token");
    Cookie::new("agency_session", token.token)
}

fn location(response: &LocalResponse<'_>) -> String {
    response
        .headers()
        .get_one("Location")
        .expect("Location header present")
        .to_string()
}

#[test]
fn anonymous_request_redirects_to_login_with_callback() {
    let client = gate_client();

    let response = client.get("/admin").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/admin/login?callbackUrl=%2Fadmin");
}

#[test]
fn anonymous_request_to_nested_page_preserves_full_path() {
    let client = gate_client();

    let response = client.get("/admin/clients").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(
        location(&response),
        "/admin/login?callbackUrl=%2Fadmin%2Fclients"
    );
}

#[test]
fn anonymous_request_to_login_page_renders_the_form() {
    let client = gate_client();

    let response = client.get("/admin/login").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().expect("body");
    assert!(body.contains("name=\"email\""));
    assert!(body.contains("name=\"password\""));
}

#[test]
fn login_page_carries_the_callback_into_the_form() {
    let client = gate_client();

    let response = client
        .get("/admin/login?callbackUrl=%2Fadmin%2Fprojects")
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().expect("body");
    assert!(body.contains(r#"name="callbackUrl" value="/admin/projects""#));
}

#[test]
fn staff_session_is_allowed_through() {
    let client = gate_client();

    for role in [Role::Admin, Role::Editor] {
        let response = client
            .get("/admin")
            .cookie(session_cookie_for(role))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().expect("body");
        assert!(body.contains("Dashboard"));
    }
}

#[test]
fn viewer_session_is_redirected_to_public_landing() {
    let client = gate_client();

    let response = client
        .get("/admin")
        .cookie(session_cookie_for(Role::Viewer))
        .dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/");
}

#[test]
fn authenticated_visit_to_login_page_bounces_to_admin() {
    let client = gate_client();

    let response = client
        .get("/admin/login")
        .cookie(session_cookie_for(Role::Admin))
        .dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/admin");
}

// Editing the payload to promote viewer to admin breaks the signature; the
// gate must treat the cookie as no session at all.
#[test]
fn role_edited_token_is_treated_as_no_session() {
    let client = gate_client();

    let cookie = session_cookie_for(Role::Viewer);
    let token = cookie.value().to_string();
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let payload = engine.decode(parts[1]).expect("decode payload");
    let edited = String::from_utf8(payload)
        .expect("utf8 payload")
        .replace("viewer", "admin");
    let forged = format!("{}.{}.{}", parts[0], engine.encode(edited), parts[2]);

    let response = client
        .get("/admin")
        .cookie(Cookie::new("agency_session", forged))
        .dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/admin/login?callbackUrl=%2Fadmin");
}

#[test]
fn garbage_cookie_is_treated_as_no_session() {
    let client = gate_client();

    let response = client
        .get("/admin")
        .cookie(Cookie::new("agency_session", "not-a-token"))
        .dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(location(&response), "/admin/login?callbackUrl=%2Fadmin");
}
