use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{gate::AuthUser, password},
    error::AppError,
    models::user::{CredentialsPayload, User, UserResponse},
    AppState,
};

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let password_hash = password::hash(&payload.password)?;
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, created_at, updated_at, email, password_hash, is_premium) \
         VALUES (?, ?, ?, ?, ?, 0) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(now)
    .bind(now)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<UserResponse>, AppError> {
    let password_hash = password::hash(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET email = ?, password_hash = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
