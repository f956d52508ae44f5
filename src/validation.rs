//! Input validation for note names.

use crate::error::{ParaError, Result};

/// Characters that break wiki links or paths when used in a note name.
const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', '#', '^', '|', '\\', '/', ':', '?'];

/// Validates a project, area or resource name and returns it trimmed.
pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ParaError::Validation("Name cannot be empty".to_string()));
    }
    if name.starts_with('.') {
        return Err(ParaError::Validation(
            "Name cannot start with '.'".to_string(),
        ));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(ParaError::Validation(format!(
            "Name cannot contain '{}' (forbidden: [ ] # ^ | \\ / : ?)",
            c
        )));
    }
    Ok(name.to_string())
}
