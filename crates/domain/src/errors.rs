//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, not transport errors (see `StoreError`)

use thiserror::Error;

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Business validation: record ids are positive integers
    #[error("{kind} ID must be a number, got '{value}'")]
    InvalidRecordId { kind: &'static str, value: String },

    /// Business validation: amounts cannot be negative
    #[error("Invalid amount for field '{field}': {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    /// Business validation: unparseable date or timestamp
    #[error("Invalid date for field '{field}': '{value}'")]
    InvalidDate { field: &'static str, value: String },

    /// Business validation: unknown industry label
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    /// Business validation: limits must select at least one row
    #[error("Limit must be greater than 0")]
    ZeroLimit,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if error is an input validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidRecordId { .. }
                | DomainError::NegativeAmount { .. }
                | DomainError::InvalidDate { .. }
                | DomainError::UnknownIndustry(_)
                | DomainError::ZeroLimit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = DomainError::InvalidRecordId {
            kind: "Deal",
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Deal ID must be a number, got 'abc'");
        assert!(error.is_validation_error());

        let error = DomainError::NegativeAmount {
            field: "value",
            value: -5.0,
        };
        assert!(error.to_string().contains("value"));
        assert!(error.to_string().contains("-5"));
    }
}
