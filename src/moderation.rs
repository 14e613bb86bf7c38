use std::sync::OnceLock;

use regex::Regex;

use crate::error::AppError;

const MAX_POST_LENGTH: usize = 140;
const MASK: &str = "****";

fn forbidden_words() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("(?i)(kerfuffle|sharbert|fornax)").expect("forbidden-word pattern")
    })
}

/// Enforce the post length cap and mask words from the blocklist.
pub fn clean_body(body: &str) -> Result<String, AppError> {
    if body.chars().count() > MAX_POST_LENGTH {
        return Err(AppError::BadRequest("Post is too long".to_string()));
    }
    Ok(forbidden_words().replace_all(body, MASK).into_owned())
}
