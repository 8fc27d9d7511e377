//! Common validation helpers for numeric configuration values.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is finite and >= 0.
///
/// # Example
/// ```
/// use vocatrack_spec::validation::validate_non_negative;
///
/// assert!(validate_non_negative("between_words", 0.0).is_ok());
/// assert!(validate_non_negative("between_words", 1.0).is_ok());
/// assert!(validate_non_negative("between_words", -1.0).is_err());
/// ```
pub fn validate_non_negative(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value < 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that an integer count is at least `min`.
pub fn validate_at_least(name: &str, value: u64, min: u64) -> Result<(), CommonValidationError> {
    if value < min {
        return Err(CommonValidationError::new(format!(
            "{} must be at least {}, got {}",
            name, min, value
        )));
    }
    Ok(())
}
