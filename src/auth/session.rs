use chrono::Duration;
use sqlx::SqlitePool;

use crate::models::user::User;

use super::error::AuthError;
use super::password;
use super::refresh::RefreshTokenStore;
use super::token::TokenSigner;

/// Access tokens stay valid for one hour; revocation granularity is bounded
/// by this window, the rest is the refresh token's job.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 1;

/// Everything a successful login hands back.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Orchestrates the login / refresh / revoke flows over the password
/// hasher, the token signer and the refresh-token store.
#[derive(Clone)]
pub struct SessionService {
    db: SqlitePool,
    signer: TokenSigner,
    refresh_tokens: RefreshTokenStore,
}

impl SessionService {
    pub fn new(db: SqlitePool, signer: TokenSigner) -> Self {
        let refresh_tokens = RefreshTokenStore::new(db.clone());
        Self {
            db,
            signer,
            refresh_tokens,
        }
    }

    /// Verify the credentials and mint one access token plus one brand-new
    /// refresh token. Prior sessions stay valid; concurrent sessions per
    /// user are allowed.
    ///
    /// Unknown email and wrong password collapse into the same failure so
    /// the login surface cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::debug!("login rejected: unknown email");
                AuthError::InvalidCredentials
            })?;

        password::verify(password, &user.password_hash)?;

        let access_token = self
            .signer
            .issue(user.id, Duration::hours(ACCESS_TOKEN_TTL_HOURS))?;
        let refresh_token = self.refresh_tokens.issue(user.id).await?;

        Ok(Session {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Exchange a stored refresh token for a fresh access token.
    ///
    /// The refresh token is not rotated or consumed; it stays usable until
    /// its own expiry or an explicit revoke. The three rejection causes
    /// stay distinct here for logging and collapse at the HTTP boundary.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let record = self.refresh_tokens.lookup(refresh_token).await?;

        if record.is_revoked() {
            tracing::debug!(user_id = %record.user_id, "refresh rejected: token revoked");
            return Err(AuthError::Revoked);
        }
        if record.is_expired() {
            tracing::debug!(user_id = %record.user_id, "refresh rejected: token expired");
            return Err(AuthError::Expired);
        }

        self.signer
            .issue(record.user_id, Duration::hours(ACCESS_TOKEN_TTL_HOURS))
    }

    /// Revoke a refresh token. The system's entire logout mechanism.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.refresh_tokens.revoke(refresh_token).await
    }
}
