use crate::auth::{AuthError, AuthResult};

/// Authentication configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub session_ttl_secs: i64,
    pub session_cookie_name: String,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    /// Path prefix the access gate applies to. The login page under this
    /// prefix is carved out of the "must hold a valid session" branch.
    pub admin_prefix: String,
    pub session_secret: String,
}

impl AuthConfig {
    pub fn from_env() -> AuthResult<Self> {
        let issuer =
            std::env::var("AGENCY_JWT_ISSUER").unwrap_or_else(|_| "http://localhost".into());
        let audience = std::env::var("AGENCY_JWT_AUDIENCE").unwrap_or_else(|_| "agency-api".into());
        let session_ttl_secs = std::env::var("AGENCY_SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(8 * 60 * 60);
        let session_cookie_name = std::env::var("AGENCY_SESSION_COOKIE_NAME")
            .unwrap_or_else(|_| "agency_session".into());
        let cookie_domain = std::env::var("AGENCY_COOKIE_DOMAIN").ok();
        let cookie_secure = std::env::var("AGENCY_COOKIE_SECURE")
            .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "on"))
            .unwrap_or(true);
        let admin_prefix =
            std::env::var("AGENCY_ADMIN_PREFIX").unwrap_or_else(|_| "/admin".into());
        let session_secret = std::env::var("AGENCY_SESSION_SECRET")
            .map_err(|_| AuthError::Config("AGENCY_SESSION_SECRET is required".into()))?;

        Ok(Self {
            issuer,
            audience,
            session_ttl_secs,
            session_cookie_name,
            cookie_domain,
            cookie_secure,
            admin_prefix,
            session_secret,
        })
    }

    pub fn login_path(&self) -> String {
        format!("{}/login", self.admin_prefix)
    }
}
