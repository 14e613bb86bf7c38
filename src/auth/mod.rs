//! Authentication and session-token lifecycle: password hashing, signed
//! access tokens, stored refresh tokens, credential extraction and the
//! request-level authorization gate.

pub mod error;
pub mod extract;
pub mod gate;
pub mod password;
pub mod refresh;
pub mod session;
pub mod token;

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::Utc;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    pub async fn test_pool() -> SqlitePool {
        // One connection, or every pooled connection would get its own
        // private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    pub async fn seed_user(pool: &SqlitePool, email: &str) -> Uuid {
        seed_user_with_password(pool, email, "password").await
    }

    pub async fn seed_user_with_password(pool: &SqlitePool, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let password_hash = super::password::hash(password).unwrap();
        sqlx::query(
            "INSERT INTO users (id, created_at, updated_at, email, password_hash, is_premium) \
             VALUES (?, ?, ?, ?, ?, 0)",
        )
        .bind(id)
        .bind(now)
        .bind(now)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await
        .unwrap();
        id
    }
}
