use rocket::State;
use rocket::FromForm;
use rocket::form::Form;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::response::status;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket_db_pools::sqlx;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use time::Duration as TimeDuration;

use crate::auth::authenticator::Authenticator;
use crate::auth::responses::{Identity, LoginRequest, LoginResponse, SessionSummary};
use crate::auth::store::CredentialStore;
use crate::auth::tokens::SignedSessionToken;
use crate::auth::{AuthError, AuthState, guards::AuthUser};

type AuthRouteResult<T> = Result<Json<T>, status::Custom<Json<AuthErrorResponse>>>;

#[derive(Debug, serde::Serialize, JsonSchema)]
pub struct AuthErrorResponse {
    pub status: u16,
    pub message: String,
}

/// JSON login: verify credentials, mint a session token, set the cookie.
/// Failures answer with one generic message; which step failed is only
/// visible in the logs.
#[post("/login", format = "json", data = "<payload>")]
pub async fn login(
    state: &State<AuthState>,
    pool: &State<sqlx::PgPool>,
    cookies: &CookieJar<'_>,
    payload: Json<LoginRequest>,
) -> AuthRouteResult<LoginResponse> {
    let identity = authenticate(state, pool, &payload.email, &payload.password)
        .await
        .map_err(respond_error)?;

    let token = state.tokens.issue(&identity).map_err(respond_error)?;
    set_session_cookie(cookies, state, &token);

    Ok(Json(LoginResponse {
        session_expires_at: token.expires_at,
        user: identity,
    }))
}

#[derive(Debug, FromForm)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[field(name = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Form login for the admin login page. Success redirects to the callback
/// target (or the admin landing page); failure bounces back to the login
/// page with an error flag, callback preserved.
#[post("/login", data = "<form>", rank = 2)]
pub async fn login_form(
    state: &State<AuthState>,
    pool: &State<sqlx::PgPool>,
    cookies: &CookieJar<'_>,
    form: Form<LoginForm>,
) -> Redirect {
    let callback = form
        .callback_url
        .as_deref()
        .filter(|target| is_safe_callback(target, &state.config.admin_prefix));

    match authenticate(state, pool, &form.email, &form.password).await {
        Ok(identity) => match state.tokens.issue(&identity) {
            Ok(token) => {
                set_session_cookie(cookies, state, &token);
                Redirect::to(
                    callback
                        .map(str::to_string)
                        .unwrap_or_else(|| state.config.admin_prefix.clone()),
                )
            }
            Err(err) => {
                log::error!("session issuance failed: {err}");
                Redirect::to(login_retry_target(state, callback))
            }
        },
        Err(err) => {
            log::debug!("form login rejected: {err}");
            Redirect::to(login_retry_target(state, callback))
        }
    }
}

/// Clear the session cookie and send the browser back to the login page.
#[post("/logout")]
pub async fn logout(state: &State<AuthState>, cookies: &CookieJar<'_>) -> Redirect {
    clear_session_cookie(cookies, state);
    Redirect::to(state.config.login_path())
}

/// Current session introspection for the admin UI.
#[openapi(tag = "Auth")]
#[get("/session")]
pub async fn session(user: AuthUser) -> Json<SessionSummary> {
    Json(SessionSummary {
        subject_id: user.id,
        role: user.role,
        expires_at: user.expires_at,
    })
}

async fn authenticate(
    state: &State<AuthState>,
    pool: &State<sqlx::PgPool>,
    email: &str,
    password: &str,
) -> Result<Identity, AuthError> {
    let store = CredentialStore::new(pool.inner().clone());
    let authenticator = Authenticator::new(store, state.passwords.clone());
    authenticator.authenticate(email, password).await
}

/// Only relative paths inside the admin area are honored as post-login
/// targets; anything else would make the login form an open redirector.
fn is_safe_callback(target: &str, admin_prefix: &str) -> bool {
    target.starts_with(admin_prefix) && !target.starts_with("//")
}

fn login_retry_target(state: &State<AuthState>, callback: Option<&str>) -> String {
    match callback {
        Some(target) => format!(
            "{}?error=1&callbackUrl={}",
            state.config.login_path(),
            urlencoding::encode(target)
        ),
        None => format!("{}?error=1", state.config.login_path()),
    }
}

fn set_session_cookie(
    cookies: &CookieJar<'_>,
    state: &State<AuthState>,
    token: &SignedSessionToken,
) {
    let mut cookie = Cookie::build((
        state.config.session_cookie_name.clone(),
        token.token.clone(),
    ))
    .path(state.config.admin_prefix.clone())
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(state.config.cookie_secure)
    .max_age(TimeDuration::seconds(state.config.session_ttl_secs))
    .build();

    if let Some(domain) = &state.config.cookie_domain {
        cookie.set_domain(domain.clone());
    }

    cookies.add(cookie);
}

fn clear_session_cookie(cookies: &CookieJar<'_>, state: &State<AuthState>) {
    let mut cookie = Cookie::build((state.config.session_cookie_name.clone(), String::new()))
        .path(state.config.admin_prefix.clone())
        .removal()
        .build();

    if let Some(domain) = &state.config.cookie_domain {
        cookie.set_domain(domain.clone());
    }

    cookies.add(cookie);
}

fn respond_error(err: AuthError) -> status::Custom<Json<AuthErrorResponse>> {
    let status = err.status();
    if status == Status::InternalServerError {
        log::error!("auth failure: {err}");
    } else {
        log::debug!("auth rejection: {err}");
    }
    status::Custom(
        status,
        Json(AuthErrorResponse {
            status: status.code,
            message: err.public_message().to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::is_safe_callback;

    #[test]
    fn callback_must_stay_inside_the_admin_area() {
        assert!(is_safe_callback("/admin", "/admin"));
        assert!(is_safe_callback("/admin/clients", "/admin"));
        assert!(!is_safe_callback("https://evil.example", "/admin"));
        assert!(!is_safe_callback("//evil.example/admin", "/admin"));
        assert!(!is_safe_callback("/", "/admin"));
    }
}
