//! Field rules shared by the service layer and the entities.
//!
//! Column widths mirror the migrations; a value that passes here will not be
//! truncated or rejected by the database for length.

use crate::errors::ModelError;

pub const EVENT_NAME_MAX: usize = 100;
pub const ACTIVITY_NAME_MAX: usize = 100;
pub const ATTENDEE_NAME_MAX: usize = 75;
pub const EMAIL_MAX: usize = 255;

/// Name must contain a non-whitespace character and fit in `max` characters.
pub fn validate_name(name: &str, max: usize) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.chars().count() > max {
        return Err(ModelError::Validation(format!("name must be at most {max} characters")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.len() > EMAIL_MAX {
        return Err(ModelError::Validation(format!("email must be at most {EMAIL_MAX} characters")));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

/// Lookup key for name searches: lowercase with all whitespace removed.
/// Both stores compare names through this key.
pub fn name_key(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
}
