use argon2::{
    password_hash::{rand_core::OsRng, Error as HashError, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

use super::error::AuthError;

/// Hash a plaintext password with a fresh random salt.
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(AuthError::Hashing)?
        .to_string();
    Ok(hashed)
}

/// Check a plaintext password against a stored hash.
///
/// A mismatch is a credential failure; a stored hash that cannot be parsed
/// is an operational one.
pub fn verify(password: &str, hashed: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hashed).map_err(AuthError::Hashing)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| match e {
            HashError::Password => AuthError::InvalidCredentials,
            other => AuthError::Hashing(other),
        })
}
