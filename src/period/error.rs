//! Period resolution error types

use thiserror::Error;

/// Errors that can occur while building or resolving date ranges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// Range end falls before its start
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    /// A date string could not be parsed as YYYY-MM-DD
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// Date arithmetic left the representable calendar
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Result type alias for period operations
pub type PeriodResult<T> = Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PeriodError::InvalidRange {
            from: "2025-03-10".to_string(),
            to: "2025-03-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2025-03-10 is after 2025-03-01"
        );

        let err = PeriodError::InvalidDate {
            input: "2025-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date '2025-13-01': input is out of range"
        );
    }
}
