use thiserror::Error;

/// Every way an authentication or session operation can fail.
///
/// Credential and token failures are classified here at the point of
/// verification; none of them leave the auth module as a generic error.
/// `Hashing` and `Store` are the only operational kinds — they carry their
/// source for logging while the HTTP layer renders a generic body.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingCredential,
    #[error("malformed authorization header")]
    MalformedCredential,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("malformed token")]
    MalformedToken,
    #[error("token expired")]
    Expired,
    #[error("token revoked")]
    Revoked,
    #[error("unknown refresh token")]
    NotFound,
    #[error("token subject is not a usable identity")]
    InvalidSubject,
    #[error("caller does not own this resource")]
    Forbidden,
    #[error("password hashing failed")]
    Hashing(#[source] argon2::password_hash::Error),
    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("persistence failure")]
    Store(#[from] sqlx::Error),
}

impl AuthError {
    /// True for the kinds that indicate an operational problem rather than
    /// a bad caller input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_)
        )
    }
}
