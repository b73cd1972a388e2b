//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A blank (empty or whitespace-only) string was supplied where text is required.
    #[error("Input is empty")]
    EmptyInput,
}

impl DomainError {
    /// Check if this error represents rejected blank input
    pub fn is_empty_input(&self) -> bool {
        matches!(self, DomainError::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        assert_eq!(DomainError::EmptyInput.to_string(), "Input is empty");
    }

    #[test]
    fn test_is_empty_input_check() {
        assert!(DomainError::EmptyInput.is_empty_input());
    }
}
