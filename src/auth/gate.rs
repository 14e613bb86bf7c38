use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{error::AppError, AppState};

use super::extract;

/// The verified identity of the caller, pulled from the bearer token.
///
/// Resource handlers that act on owned data extract this, then compare the
/// id against the resource's owner themselves; a mismatch is `Forbidden`,
/// distinct from the credential failures this extractor rejects with.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract::bearer_token(&parts.headers)?;
        let user_id = state.signer.verify(token)?;
        Ok(AuthUser(user_id))
    }
}
