//! Error types for tableqb

use thiserror::Error;

/// Result type alias for tableqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Boxed error produced by a database driver.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for query building and execution
#[derive(Debug, Error)]
pub enum QbError {
    /// WHERE connector outside `and` / `or` / `where`
    #[error("Invalid where type \"{0}\"")]
    InvalidConnector(String),

    /// ORDER BY direction outside `asc` / `desc`
    #[error("Invalid order direction \"{0}\"")]
    InvalidDirection(String),

    /// Failure reported by the injected driver, passed through untouched
    #[error("Driver error: {0}")]
    Driver(#[source] DriverError),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Builder state cannot be rendered into a valid statement
    #[error("Validation error: {0}")]
    Validation(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl QbError {
    /// Wrap a driver failure.
    pub fn driver(err: impl Into<DriverError>) -> Self {
        Self::Driver(err.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error came from the driver
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver(_))
    }

    /// Check if this is an invalid connector error
    pub fn is_invalid_connector(&self) -> bool {
        matches!(self, Self::InvalidConnector(_))
    }

    /// Borrow the driver's own error, if this is a driver failure of type `E`.
    pub fn driver_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Driver(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}
