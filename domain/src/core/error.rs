//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown category: {0} (expected one of: hr_finance, it)")]
    UnknownCategory(String),
}

impl DomainError {
    /// Check if this error was caused by caller input rather than system state
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidQuestion(_) | DomainError::UnknownCategory(_)
        )
    }
}
