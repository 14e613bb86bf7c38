use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::error::AuthError;

/// Opaque refresh tokens live this long unless revoked first.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// One persisted refresh token. The token string itself is the primary key.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Usable to mint a new access token: not revoked and not expired.
    pub fn is_usable(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

/// Issues, looks up and revokes the long-lived opaque tokens.
#[derive(Clone)]
pub struct RefreshTokenStore {
    db: SqlitePool,
}

impl RefreshTokenStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Mint a fresh token for `user_id` and persist it.
    ///
    /// 256 bits of OS randomness, hex-encoded; collisions are treated as
    /// cryptographically negligible, and the primary key turns one into a
    /// store error rather than a silent overwrite.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let token = generate_token();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at, revoked_at) \
             VALUES (?, ?, ?, ?, ?, NULL)",
        )
        .bind(&token)
        .bind(now)
        .bind(now)
        .bind(user_id)
        .bind(now + Duration::days(REFRESH_TOKEN_TTL_DAYS))
        .execute(&self.db)
        .await?;
        Ok(token)
    }

    pub async fn lookup(&self, token: &str) -> Result<RefreshTokenRecord, AuthError> {
        sqlx::query_as::<_, RefreshTokenRecord>("SELECT * FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Mark a token revoked.
    ///
    /// Single UPDATE so two racing revokes cannot tear the timestamp; the
    /// COALESCE keeps the first revocation time in place, so revoking twice
    /// is harmless and never un-revokes. An unknown token is `NotFound`.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = COALESCE(revoked_at, ?), updated_at = ? \
             WHERE token = ?",
        )
        .bind(now)
        .bind(now)
        .bind(token)
        .execute(&self.db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testutil::{seed_user, test_pool};

    #[test]
    fn generated_tokens_are_64_hex_chars_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn issue_persists_a_usable_record() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool, "issue@example.com").await;
        let store = RefreshTokenStore::new(pool);

        let token = store.issue(user_id).await.unwrap();
        assert_eq!(token.len(), 64);

        let record = store.lookup(&token).await.unwrap();
        assert_eq!(record.user_id, user_id);
        assert!(record.revoked_at.is_none());
        assert!(record.is_usable());
    }

    #[tokio::test]
    async fn lookup_unknown_token_is_not_found() {
        let pool = test_pool().await;
        let store = RefreshTokenStore::new(pool);
        assert!(matches!(
            store.lookup("deadbeef").await,
            Err(AuthError::NotFound)
        ));
    }

    #[tokio::test]
    async fn revoke_transitions_out_of_usable() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool, "revoke@example.com").await;
        let store = RefreshTokenStore::new(pool);

        let token = store.issue(user_id).await.unwrap();
        store.revoke(&token).await.unwrap();

        let record = store.lookup(&token).await.unwrap();
        assert!(record.is_revoked());
        assert!(!record.is_usable());
    }

    #[tokio::test]
    async fn second_revoke_keeps_first_timestamp() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool, "twice@example.com").await;
        let store = RefreshTokenStore::new(pool);

        let token = store.issue(user_id).await.unwrap();
        store.revoke(&token).await.unwrap();
        let first = store.lookup(&token).await.unwrap().revoked_at.unwrap();

        store.revoke(&token).await.unwrap();
        let second = store.lookup(&token).await.unwrap().revoked_at.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn revoke_unknown_token_is_not_found() {
        let pool = test_pool().await;
        let store = RefreshTokenStore::new(pool);
        assert!(matches!(
            store.revoke("deadbeef").await,
            Err(AuthError::NotFound)
        ));
    }

    #[tokio::test]
    async fn past_expiry_makes_a_record_unusable() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool, "expired@example.com").await;
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at, revoked_at) \
             VALUES (?, ?, ?, ?, ?, NULL)",
        )
        .bind("ab".repeat(32))
        .bind(now)
        .bind(now)
        .bind(user_id)
        .bind(now - Duration::days(1))
        .execute(&pool)
        .await
        .unwrap();

        let store = RefreshTokenStore::new(pool);
        let record = store.lookup(&"ab".repeat(32)).await.unwrap();
        assert!(record.is_expired());
        assert!(!record.is_usable());
    }
}
