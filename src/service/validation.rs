//! Record name validation.

use crate::cache::MAX_KEY_LENGTH;
use crate::error::ServiceError;

/// Longest accepted name in bytes. Names double as cache keys.
pub const MAX_NAME_LENGTH: usize = MAX_KEY_LENGTH;

/// Rejects names that cannot serve as a record key.
pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "Name cannot be empty".to_string(),
        ));
    }
    if name.trim() != name {
        return Err(ServiceError::InvalidInput(
            "Name cannot start or end with whitespace".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ServiceError::InvalidInput(format!(
            "Name exceeds maximum length of {} bytes",
            MAX_NAME_LENGTH
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(ServiceError::InvalidInput(
            "Name cannot contain control characters".to_string(),
        ));
    }
    Ok(())
}
