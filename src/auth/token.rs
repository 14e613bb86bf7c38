use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AuthError;

const ISSUER: &str = "warbler";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    jti: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies the short-lived access tokens.
///
/// Verification is pure: it needs only the signing secret, never the
/// database. Revocation before expiry is handled entirely on the
/// refresh-token side.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed token asserting `user_id` until `now + ttl`.
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            // Distinguishes tokens minted for the same user within one second.
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Verify signature and expiry, returning the embedded user identity.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::BadSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        // The signature can verify while the subject claim is still unusable.
        // A nil identity is a legitimate parse result, so it gets its own kind.
        let user_id =
            Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidSubject)?;
        if user_id.is_nil() {
            return Err(AuthError::InvalidSubject);
        }
        Ok(user_id)
    }
}
