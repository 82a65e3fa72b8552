use rocket_db_pools::sqlx::{self, FromRow, PgPool};

use crate::auth::AuthResult;

/// Raw user row as stored. `password_hash` is nullable: externally
/// provisioned accounts may exist without a local secret and can never pass
/// password login.
#[derive(Debug, Clone, FromRow)]
pub struct IdentityRecord {
    pub id: i32,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: String,
}

/// Read-side access to the `users` table. Only the authenticator talks to
/// this; everything downstream works from the verified [`Identity`] claim.
///
/// [`Identity`]: crate::auth::responses::Identity
#[derive(Clone)]
pub struct CredentialStore {
    pool: PgPool,
}

impl CredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user by login key. Emails are stored as entered but matched
    /// case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> AuthResult<Option<IdentityRecord>> {
        let record = sqlx::query_as(
            r#"SELECT id, email, display_name, password_hash, role
               FROM users
               WHERE lower(email) = lower($1)"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn touch_last_login(&self, user_id: i32) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login_at = now() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
