use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{error::AuthError, extract},
    error::AppError,
    AppState,
};

const UPGRADE_EVENT: &str = "user.upgraded";

#[derive(Debug, Deserialize)]
pub struct PaymentEvent {
    pub event: String,
    pub data: PaymentEventData,
}

#[derive(Debug, Deserialize)]
pub struct PaymentEventData {
    pub user_id: String,
}

// Trusted partner calls authenticate with the static pre-shared key, never
// with a user token.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PaymentEvent>,
) -> Result<StatusCode, AppError> {
    let key = extract::api_key(&headers)?;
    if key != state.webhook_key {
        tracing::debug!("webhook rejected: key mismatch");
        return Err(AuthError::InvalidCredentials.into());
    }

    if payload.event != UPGRADE_EVENT {
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = Uuid::parse_str(&payload.data.user_id)
        .map_err(|_| AppError::NotFound("Unknown user".to_string()))?;

    let result = sqlx::query("UPDATE users SET is_premium = 1, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(user_id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Unknown user".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
