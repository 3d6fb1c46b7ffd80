use thiserror::Error;

/// Errors that can occur when constructing a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date range: start date must be before or equal to end date")]
    InvalidRange,
    #[error("Date range too long (max {max_days} days)")]
    TooLong { max_days: i64 },
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a `NotFound` error keyed by any displayable id.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_error_display() {
        assert_eq!(
            DateRangeError::InvalidRange.to_string(),
            "Invalid date range: start date must be before or equal to end date"
        );
        assert_eq!(
            DateRangeError::TooLong { max_days: 92 }.to_string(),
            "Date range too long (max 92 days)"
        );
    }

    #[test]
    fn test_not_found_shorthand() {
        let error = RepositoryError::not_found("Reservation", "abc-123");
        assert_eq!(error.to_string(), "Reservation not found: abc-123");
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Salon",
            id: "atelier-nord".to_string(),
        };
        assert_eq!(error.to_string(), "Salon already exists: atelier-nord");
    }

    #[test]
    fn test_backend_failures_display() {
        assert_eq!(
            RepositoryError::ConnectionFailed("database is locked".to_string()).to_string(),
            "Connection failed: database is locked"
        );
        assert_eq!(
            RepositoryError::Serialization("bad slots json".to_string()).to_string(),
            "Serialization error: bad slots json"
        );
    }
}
