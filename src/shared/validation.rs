//! Input Validation
//!
//! Pure validation functions applied before any store mutation. All
//! validators are total: they take a candidate value, return a boolean and
//! never panic or touch anything outside their arguments.
//!
//! # Character class
//!
//! Identifiers and names share one character class: ASCII alphanumerics,
//! hyphen and space. A v4 uuid in its hyphenated form satisfies the
//! identifier rule (36 characters, all in class).

use serde_json::Value;

use crate::shared::error::SharedError;

/// Exact length of a board identifier
pub const IDENTIFIER_LEN: usize = 36;

/// Maximum length of a board name
pub const NAME_MAX_LEN: usize = 32;

/// The colours a note is allowed to carry
pub const ALLOWED_COLOURS: [&str; 4] = ["white", "yellow", "blue", "green"];

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ' '
}

/// True iff `id` is exactly 36 characters, all in the allowed class
pub fn is_identifier_valid(id: &str) -> bool {
    id.len() == IDENTIFIER_LEN && id.chars().all(is_allowed_char)
}

/// True iff `name` is at most 32 characters, all in the allowed class
pub fn is_name_valid(name: &str) -> bool {
    name.len() <= NAME_MAX_LEN && name.chars().all(is_allowed_char)
}

/// [`is_identifier_valid`] as a `Result`, for handlers that propagate
/// with `?`
pub fn validate_identifier(field: &str, id: &str) -> Result<(), SharedError> {
    if is_identifier_valid(id) {
        Ok(())
    } else {
        Err(SharedError::validation(
            field,
            "must be a 36-character identifier",
        ))
    }
}

/// [`is_name_valid`] as a `Result`
pub fn validate_name(field: &str, name: &str) -> Result<(), SharedError> {
    if is_name_valid(name) {
        Ok(())
    } else {
        Err(SharedError::validation(
            field,
            "must be at most 32 characters of letters, digits, spaces or hyphens",
        ))
    }
}

/// Structural check for a note payload
///
/// The candidate must be an object with exactly the keys
/// `{colour, position, text}`; `position` must be an object with exactly
/// `{left, top}`, both numbers; `colour` must be one of the four allowed
/// colours; `text` must be a string. Any deviation, extra key, missing
/// key or wrong type makes the candidate invalid.
pub fn is_valid_note(candidate: &Value) -> bool {
    let obj = match candidate.as_object() {
        Some(obj) => obj,
        None => return false,
    };
    if obj.len() != 3 {
        return false;
    }

    let colour = match obj.get("colour").and_then(Value::as_str) {
        Some(colour) => colour,
        None => return false,
    };
    if !ALLOWED_COLOURS.contains(&colour) {
        return false;
    }

    let position = match obj.get("position").and_then(Value::as_object) {
        Some(position) => position,
        None => return false,
    };
    if position.len() != 2 {
        return false;
    }
    let left_ok = position.get("left").map(Value::is_number).unwrap_or(false);
    let top_ok = position.get("top").map(Value::is_number).unwrap_or(false);
    if !(left_ok && top_ok) {
        return false;
    }

    obj.get("text").map(Value::is_string).unwrap_or(false)
}
