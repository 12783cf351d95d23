//! Errors raised while turning raw form strings into domain inputs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("year must be a whole number, got {0:?}")]
    InvalidYear(String),
    #[error("cost must be a decimal number, got {0:?}")]
    InvalidCost(String),
    #[error("cost must not be negative")]
    NegativeCost,
    #[error("cost must not exceed {0}")]
    CostTooLarge(String),
}

/// Trim a required text field, rejecting blanks.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
