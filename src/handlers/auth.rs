use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    auth::extract,
    error::AppError,
    models::user::{CredentialsPayload, LoginResponse, RefreshResponse},
    AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .sessions()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user: session.user.into(),
        token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}

// The refresh token travels in the bearer header; only the session service
// can tell the two token kinds apart, by where it looks them up.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh_token = extract::bearer_token(&headers)?;
    let token = state.sessions().refresh(refresh_token).await?;
    Ok(Json(RefreshResponse { token }))
}

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let refresh_token = extract::bearer_token(&headers)?;
    state.sessions().revoke(refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
