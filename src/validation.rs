//! Validation for identifiers that end up in request paths.
//!
//! Story ids come back from the API (or are generated locally) and are
//! interpolated into `/api/Story/Edit/{id}` and `/api/Story/Delete/{id}`;
//! anything that could change the path shape is refused before a request is sent.

use thiserror::Error;

/// Maximum accepted length for a story id.
pub const MAX_STORY_ID_LENGTH: usize = 128;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("story id cannot be empty")]
    Empty,
    #[error("story id too long: {0} characters (max {MAX_STORY_ID_LENGTH})")]
    TooLong(usize),
    #[error("story id '{0}' contains invalid characters; only alphanumerics, '-' and '_' are allowed")]
    InvalidCharacters(String),
}

/// Validates that a story id is safe to place in a URL path segment.
///
/// # Examples
///
/// ```
/// use story_spoiler::validation::validate_story_id;
///
/// assert!(validate_story_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
/// assert!(validate_story_id("").is_err());
/// assert!(validate_story_id("../User/Authentication").is_err());
/// ```
pub fn validate_story_id(id: &str) -> Result<(), IdError> {
    if id.is_empty() {
        return Err(IdError::Empty);
    }

    if id.len() > MAX_STORY_ID_LENGTH {
        return Err(IdError::TooLong(id.len()));
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        return Err(IdError::InvalidCharacters(id.to_string()));
    }

    Ok(())
}
