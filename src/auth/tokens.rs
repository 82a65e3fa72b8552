use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::auth::responses::{Identity, Role};
use crate::auth::{AuthConfig, AuthError, AuthResult};

/// Signed claim set carried by the session cookie. `role` is copied from the
/// identity at issuance time and trusted until expiry; a later role change
/// does not revoke tokens already in the wild.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub role: Role,
}

impl SessionClaims {
    pub fn subject_id(&self) -> AuthResult<i32> {
        self.sub.parse().map_err(|_| AuthError::InvalidSession)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Clone)]
pub struct SignedSessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints and verifies session tokens (HS256). Tampering with any claim
/// invalidates the signature; expiry is checked with zero leeway.
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    session_ttl: Duration,
}

impl SessionTokenService {
    pub fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        let secret_bytes = config.session_secret.as_bytes();
        let encoding_key = EncodingKey::from_secret(secret_bytes);
        let decoding_key = DecodingKey::from_secret(secret_bytes);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[config.audience.clone()]);
        validation.set_issuer(&[config.issuer.clone()]);
        validation.leeway = 0;

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            session_ttl: Duration::seconds(config.session_ttl_secs),
        })
    }

    pub fn issue(&self, identity: &Identity) -> AuthResult<SignedSessionToken> {
        self.issue_with_ttl(identity, self.session_ttl)
    }

    fn issue_with_ttl(
        &self,
        identity: &Identity,
        ttl: Duration,
    ) -> AuthResult<SignedSessionToken> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = SessionClaims {
            sub: identity.id.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            role: identity.role,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(SignedSessionToken { token, expires_at })
    }

    /// Decode and verify a presented token. Every failure mode (bad
    /// signature, expired, malformed, wrong issuer/audience) collapses to
    /// `InvalidSession` so callers cannot build a verification oracle.
    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_config;

    fn make_identity(role: Role) -> Identity {
        Identity {
            id: 7,
            name: Some("Ada".into()),
            email: "ada@example.com".into(),
            role,
        }
    }

    fn make_service() -> SessionTokenService {
        SessionTokenService::from_config(&test_config()).expect("token service")
    }

    #[test]
    fn round_trips_claims_before_expiry() {
        let service = make_service();
        let identity = make_identity(Role::Editor);
        let issued = service.issue(&identity).expect("issue token");

        let claims = service.verify(&issued.token).expect("verify token");
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.subject_id().expect("numeric subject"), 7);
        assert_eq!(claims.role, Role::Editor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_any_tampered_byte() {
        let service = make_service();
        let issued = service
            .issue(&make_identity(Role::Viewer))
            .expect("issue token");

        // Flip one character at every position; each mutation must fail
        // verification, including payload edits that would promote the role.
        let token = issued.token;
        for idx in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
            let Ok(mutated) = String::from_utf8(bytes) else {
                continue;
            };
            if mutated == token {
                continue;
            }
            assert!(
                service.verify(&mutated).is_err(),
                "mutation at byte {idx} was accepted"
            );
        }
    }

    #[test]
    fn rejects_expired_tokens() {
        let service = make_service();
        let issued = service
            .issue_with_ttl(&make_identity(Role::Admin), Duration::seconds(-30))
            .expect("issue expired token");

        assert!(matches!(
            service.verify(&issued.token),
            Err(AuthError::InvalidSession)
        ));
    }

    #[test]
    fn rejects_malformed_tokens() {
        let service = make_service();
        assert!(service.verify("").is_err());
        assert!(service.verify("not-a-jwt").is_err());
        assert!(service.verify("a.b.c").is_err());
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let service = make_service();
        let mut other_config = test_config();
        other_config.session_secret = "a-different-secret".into();
        let other = SessionTokenService::from_config(&other_config).expect("token service");

        let issued = other.issue(&make_identity(Role::Admin)).expect("issue");
        assert!(service.verify(&issued.token).is_err());
    }
}
