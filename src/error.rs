use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::error::AuthError;

#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Sqlx(sqlx::Error),
    BadRequest(String),
    NotFound(String),
}

impl From<AuthError> for AppError {
    fn from(inner: AuthError) -> Self {
        AppError::Auth(inner)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(inner: sqlx::Error) -> Self {
        AppError::Sqlx(inner)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Auth(AuthError::Forbidden) => {
                (StatusCode::FORBIDDEN, "Forbidden".to_string())
            }
            AppError::Auth(err) if err.is_internal() => {
                tracing::error!("auth subsystem error: {}", ErrorChain(&err));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            // Every credential and token failure renders the same body;
            // the typed kind stays visible in the logs only.
            AppError::Auth(err) => {
                tracing::debug!("request rejected: {err}");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::Sqlx(e) => {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({"error": "Email already exists"})),
                        )
                            .into_response();
                    }
                }
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Renders an error with its full source chain for the internal logs.
struct ErrorChain<'a>(&'a AuthError);

impl std::fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = std::error::Error::source(self.0);
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = std::error::Error::source(err);
        }
        Ok(())
    }
}
