//! Error types for the tend library.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comprehensive error type for all routine operations.
#[derive(Error, Debug)]
pub enum TendError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Routine not found for the given ID
    #[error("Routine with ID {id} not found")]
    RoutineNotFound { id: String },
    /// Step not found within the given routine
    #[error("Step with ID {step_id} not found in routine {routine_id}")]
    StepNotFound { routine_id: String, step_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The routine service could not be reached
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// The routine service answered with an error status
    #[error("Server responded {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TendError {
        TendError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TendError {
        TendError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TendError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a network error with context.
    pub fn network(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            message: message.into(),
            source,
        }
    }

    /// Whether the error means the addressed routine or step does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::RoutineNotFound { .. } | Self::StepNotFound { .. } => true,
            Self::Api { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Whether the error is a rejected payload rather than a failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Serialization { .. })
    }

    /// Machine-readable code carried in HTTP error bodies.
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidInput { .. } | Self::Serialization { .. } => "invalid_input",
            Self::RoutineNotFound { .. } => "routine_not_found",
            Self::StepNotFound { .. } => "step_not_found",
            Self::Api { code, .. } => code,
            _ => "storage_error",
        }
    }
}

/// JSON body of every error response of the routine API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TendError::database(message).with_source(e))
    }
}

/// Result type alias for routine operations
pub type Result<T> = std::result::Result<T, TendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = TendError::invalid_input("title").with_reason("must not be empty");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'title': must not be empty"
        );
    }

    #[test]
    fn test_not_found_classification() {
        let routine = TendError::RoutineNotFound { id: "r1".into() };
        let step = TendError::StepNotFound {
            routine_id: "r1".into(),
            step_id: "s1".into(),
        };
        let api = TendError::Api {
            status: 404,
            code: "routine_not_found".into(),
            message: "Routine not found".into(),
        };
        let config = TendError::Configuration {
            message: "missing".into(),
        };

        assert!(routine.is_not_found());
        assert!(step.is_not_found());
        assert!(api.is_not_found());
        assert!(!config.is_not_found());
        assert!(!config.is_validation());
    }

    #[test]
    fn test_error_codes() {
        let invalid = TendError::invalid_input("steps[0].duration").with_reason("too short");
        let missing = TendError::RoutineNotFound { id: "r1".into() };
        let config = TendError::Configuration {
            message: "boom".into(),
        };

        assert_eq!(invalid.code(), "invalid_input");
        assert_eq!(missing.code(), "routine_not_found");
        assert_eq!(config.code(), "storage_error");
    }
}
