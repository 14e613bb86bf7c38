use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Pull the signed access (or refresh) token out of `Authorization: Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    scheme_token(headers, BEARER_PREFIX)
}

/// Pull the pre-shared operator key out of `Authorization: ApiKey`.
///
/// This is a separate scheme for trusted server-to-server calls; it never
/// accepts a bearer-shaped header and the bearer path never accepts this one.
pub fn api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    scheme_token(headers, API_KEY_PREFIX)
}

fn scheme_token<'a>(headers: &'a HeaderMap, prefix: &str) -> Result<&'a str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;
    let token = value
        .strip_prefix(prefix)
        .ok_or(AuthError::MalformedCredential)?;
    if token.is_empty() {
        return Err(AuthError::MalformedCredential);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_extracts_token() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn bearer_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn bearer_empty_token_is_malformed() {
        assert!(matches!(
            bearer_token(&headers_with("Bearer ")),
            Err(AuthError::MalformedCredential)
        ));
    }

    #[test]
    fn bearer_wrong_prefix_is_malformed() {
        assert!(matches!(
            bearer_token(&headers_with("bearer abc")),
            Err(AuthError::MalformedCredential)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Token abc")),
            Err(AuthError::MalformedCredential)
        ));
    }

    #[test]
    fn schemes_are_not_interchangeable() {
        assert!(matches!(
            bearer_token(&headers_with("ApiKey abc")),
            Err(AuthError::MalformedCredential)
        ));
        assert!(matches!(
            api_key(&headers_with("Bearer abc")),
            Err(AuthError::MalformedCredential)
        ));
    }

    #[test]
    fn api_key_extracts_token() {
        assert_eq!(api_key(&headers_with("ApiKey s3cret")).unwrap(), "s3cret");
    }

    #[test]
    fn api_key_missing_header() {
        assert!(matches!(
            api_key(&HeaderMap::new()),
            Err(AuthError::MissingCredential)
        ));
    }
}
