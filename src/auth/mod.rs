//! Authentication module: configuration, credential verification, session
//! token minting, the access-gate decision function, Rocket request guards,
//! and HTTP route handlers.

use std::sync::Arc;

pub mod authenticator;
pub mod config;
pub mod error;
pub mod gate;
pub mod guards;
pub mod passwords;
pub mod responses;
pub mod routes;
pub mod store;
pub mod tokens;

pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use guards::{AuthUser, RequireAdmin, RequireStaff};
pub use passwords::PasswordService;
pub use responses::{Identity, Role};
pub use tokens::SessionTokenService;

#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub passwords: Arc<PasswordService>,
    pub tokens: Arc<SessionTokenService>,
}

impl AuthState {
    pub fn new(
        config: AuthConfig,
        passwords: PasswordService,
        tokens: SessionTokenService,
    ) -> Self {
        Self {
            config,
            passwords: Arc::new(passwords),
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_env() -> AuthResult<Self> {
        let config = AuthConfig::from_env()?;
        let passwords = PasswordService::new()?;
        let tokens = SessionTokenService::from_config(&config)?;
        Ok(Self::new(config, passwords, tokens))
    }
}

#[cfg(test)]
pub fn test_config() -> AuthConfig {
    AuthConfig {
        issuer: "https://agency.test".into(),
        audience: "agency-api".into(),
        session_ttl_secs: 1800,
        session_cookie_name: "agency_session".into(),
        cookie_domain: None,
        cookie_secure: false,
        admin_prefix: "/admin".into(),
        session_secret: "unit-test-signing-secret".into(),
    }
}
