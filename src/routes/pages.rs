//! Gated admin page shell. Every handler funnels through the access-gate
//! decision function: render, redirect to login with a callback, or redirect
//! away. Raw decode errors never reach the client; an unreadable cookie is
//! simply "no session".

use rocket::State;
use rocket::http::CookieJar;
use rocket::response::Redirect;
use rocket::response::content::RawHtml;
use rocket::{FromForm, Responder};
use std::path::PathBuf;

use crate::auth::AuthState;
use crate::auth::gate::{self, GateDecision, PathKind};

#[derive(Responder)]
pub enum GateResponse {
    Page(RawHtml<String>),
    Redirect(Redirect),
}

/// Admin landing page.
#[get("/")]
pub async fn admin_home(state: &State<AuthState>, cookies: &CookieJar<'_>) -> GateResponse {
    protected_page(state, cookies, &state.config.admin_prefix, "Dashboard")
}

/// Any other page in the admin area. The catch-all keeps the gate total:
/// there is no admin path that bypasses the decision table.
#[get("/<page..>", rank = 10)]
pub async fn admin_page(
    page: PathBuf,
    state: &State<AuthState>,
    cookies: &CookieJar<'_>,
) -> GateResponse {
    let requested = format!(
        "{}/{}",
        state.config.admin_prefix,
        page.to_string_lossy().replace('\\', "/")
    );
    let title = page
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "Dashboard".to_string());
    protected_page(state, cookies, &requested, &title)
}

#[derive(Debug, FromForm)]
pub struct LoginPageQuery {
    #[field(name = "callbackUrl")]
    pub callback_url: Option<String>,
    pub error: Option<u8>,
}

/// Login page. Authenticated visitors are bounced to the admin landing page
/// so the form is never shown over a live session.
#[get("/login?<query..>")]
pub async fn login_page(
    query: LoginPageQuery,
    state: &State<AuthState>,
    cookies: &CookieJar<'_>,
) -> GateResponse {
    let session = session_role(state, cookies);
    match gate::decide(
        session,
        PathKind::Login,
        &state.config.login_path(),
        &state.config,
    ) {
        GateDecision::Allow => GateResponse::Page(render_login_page(
            &state.config.login_path(),
            query.callback_url.as_deref(),
            query.error.is_some(),
        )),
        GateDecision::RedirectToLogin { callback } => {
            GateResponse::Redirect(Redirect::to(callback))
        }
        GateDecision::RedirectAway { target } => GateResponse::Redirect(Redirect::to(target)),
    }
}

fn protected_page(
    state: &State<AuthState>,
    cookies: &CookieJar<'_>,
    requested: &str,
    title: &str,
) -> GateResponse {
    let session = session_role(state, cookies);
    match gate::decide(session, PathKind::Protected, requested, &state.config) {
        GateDecision::Allow => GateResponse::Page(render_admin_page(title, &state.config)),
        GateDecision::RedirectToLogin { callback } => {
            GateResponse::Redirect(Redirect::to(callback))
        }
        GateDecision::RedirectAway { target } => GateResponse::Redirect(Redirect::to(target)),
    }
}

fn session_role(
    state: &State<AuthState>,
    cookies: &CookieJar<'_>,
) -> Option<crate::auth::Role> {
    let cookie = cookies.get(&state.config.session_cookie_name);
    gate::session_from_cookie(&state.tokens, cookie.map(|c| c.value())).map(|claims| claims.role)
}

fn render_admin_page(title: &str, config: &crate::auth::AuthConfig) -> RawHtml<String> {
    RawHtml(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title} | Agency Admin</title></head>
<body>
  <h1>{title}</h1>
  <nav>
    <a href="{prefix}">Dashboard</a>
    <a href="{prefix}/clients">Clients</a>
    <a href="{prefix}/projects">Projects</a>
    <a href="{prefix}/transactions">Transactions</a>
    <a href="{prefix}/messages">Messages</a>
  </nav>
  <form method="post" action="{prefix}/logout"><button type="submit">Log out</button></form>
</body>
</html>
"#,
        title = html_escape(title),
        prefix = config.admin_prefix,
    ))
}

fn render_login_page(
    login_path: &str,
    callback_url: Option<&str>,
    show_error: bool,
) -> RawHtml<String> {
    let error_banner = if show_error {
        "<p class=\"error\">Invalid credentials</p>"
    } else {
        ""
    };
    let callback_field = callback_url
        .map(|target| {
            format!(
                r#"<input type="hidden" name="callbackUrl" value="{}">"#,
                html_escape(target)
            )
        })
        .unwrap_or_default();

    RawHtml(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Sign in | Agency Admin</title></head>
<body>
  <h1>Sign in</h1>
  {error_banner}
  <form method="post" action="{login_path}">
    {callback_field}
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Sign in</button>
  </form>
</body>
</html>
"#,
    ))
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
