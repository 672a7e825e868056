//! Error types for the climate crate.

use thiserror::Error;

/// Result type alias for climate operations.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Errors that can occur while querying climate data.
#[derive(Error, Debug, Clone)]
pub enum ClimateError {
    /// The backing store failed or could not be reached.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The backing store does not expose the expected tables or columns.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date: {0}. Expected format: YYYY-MM-DD")]
    InvalidDate(String),

    /// A date filter supplied by the caller is not `YYYY-MM-DD`.
    #[error("Invalid date filter: {0}. Expected format: YYYY-MM-DD")]
    InvalidFilter(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClimateError {
    /// Whether the error was caused by the caller rather than the store.
    ///
    /// A stored date that fails to parse is `InvalidDate` and stays a server
    /// error; only request filters produce `InvalidFilter`.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClimateError::InvalidFilter(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for ClimateError {
    fn from(err: sqlx::Error) -> Self {
        ClimateError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for ClimateError {
    fn from(err: serde_json::Error) -> Self {
        ClimateError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(ClimateError::InvalidFilter("2017-13-45".into()).is_client_error());
        assert!(!ClimateError::InvalidDate("08/23/2017".into()).is_client_error());
        assert!(!ClimateError::StorageError("disk I/O error".into()).is_client_error());
        assert!(!ClimateError::SchemaError("missing table".into()).is_client_error());
    }

    #[test]
    fn test_invalid_date_message() {
        let err = ClimateError::InvalidDate("yesterday".into());
        assert_eq!(
            err.to_string(),
            "Invalid date: yesterday. Expected format: YYYY-MM-DD"
        );
    }
}
