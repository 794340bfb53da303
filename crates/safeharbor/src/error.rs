//! Error types for safeharbor.
//!
//! Write paths surface these errors to the caller; read paths in
//! [`crate::store`] contain them and fall back to default records.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for safeharbor operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The durable medium rejected or could not complete an operation.
    #[error("storage medium error: {message}")]
    Medium {
        /// Description of what went wrong.
        message: String,
    },

    // === Record Errors ===
    /// A contact failed validation before being written.
    #[error("invalid contact: {message}")]
    InvalidContact {
        /// Description of the validation failure.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for safeharbor operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::medium(format!("storage task did not complete: {err}"))
    }
}

impl Error {
    /// Create a new medium error.
    #[must_use]
    pub fn medium(message: impl Into<String>) -> Self {
        Self::Medium {
            message: message.into(),
        }
    }

    /// Create a new invalid contact error.
    #[must_use]
    pub fn invalid_contact(message: impl Into<String>) -> Self {
        Self::InvalidContact {
            message: message.into(),
        }
    }

    /// Check if this error came from input validation rather than storage.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidContact { .. } | Self::ConfigValidation { .. }
        )
    }

    /// A short, actionable notice suitable for showing to the user.
    ///
    /// Storage failures all map to the same notice: the data may not have
    /// been saved and the user should try again.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidContact { message } => message.clone(),
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } => {
                "Settings could not be loaded. Check the configuration file.".to_string()
            }
            _ => "Failed to save. Your changes may not have been stored. Please try again."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::medium("disk full");
        assert_eq!(err.to_string(), "storage medium error: disk full");
    }

    #[test]
    fn test_invalid_contact_display() {
        let err = Error::invalid_contact("Please enter both name and phone number.");
        assert_eq!(
            err.to_string(),
            "invalid contact: Please enter both name and phone number."
        );
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Error::invalid_contact("missing name").is_validation_error());
        assert!(Error::ConfigValidation {
            message: "bad".to_string()
        }
        .is_validation_error());
        assert!(!Error::medium("io").is_validation_error());
    }

    #[test]
    fn test_user_message_for_storage_failure() {
        let msg = Error::medium("locked").user_message();
        assert!(msg.contains("Failed to save"));
        assert!(msg.contains("try again"));
    }

    #[test]
    fn test_user_message_for_validation() {
        let msg = Error::invalid_contact("Please enter both name and phone number.").user_message();
        assert_eq!(msg, "Please enter both name and phone number.");
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
            assert!(err.user_message().contains("Failed to save"));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "busy_timeout_ms must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("busy_timeout_ms"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_database_open_error_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/db.sqlite"),
                source: sqlite_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/db.sqlite"));
        }
    }
}
