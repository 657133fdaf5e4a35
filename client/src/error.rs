//! Error types for the Geoflip account client.
//!
//! One enum per concern, following the same hierarchy throughout:
//!
//! - [`TransportError`] - a request that never produced an HTTP response
//! - [`ValidationFailure`] - a local rule rejected the form, nothing was sent
//! - [`ConfigError`] - bad API URL or environment settings
//! - [`ExportsError`] - export-job list misuse
//! - [`StorageError`] - session persistence failures
//!
//! Server rejections are not errors here: they are a regular
//! [`crate::pipeline::SubmissionOutcome`] variant.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// A request that did not yield an HTTP response.
///
/// The split mirrors what the user is told: either the request left and
/// nothing came back, or it could not be made at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request was sent but no response arrived (connect failure, timeout,
    /// aborted fetch).
    #[error("No response received: {0}")]
    NoResponse(String),

    /// Request could not be built or its response could not be read.
    #[error("{0}")]
    Client(String),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// The first validation rule that failed, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    /// Position of the failing rule in the rule list.
    pub index: usize,
    /// Message shown to the user.
    pub message: String,
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building a [`crate::config::ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// API base URL is not an http(s) URL.
    #[error("Invalid API URL '{0}': expected http:// or https://")]
    InvalidApiUrl(String),

    /// Timeout setting is not a positive number of seconds.
    #[error("Invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

// =============================================================================
// Export List Errors
// =============================================================================

/// Errors from the export-job list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportsError {
    /// `remove` was called with an index past the end of the list.
    #[error("Export job index {index} out of bounds (list has {len} jobs)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The list's owner has been torn down (e.g. a disposed UI signal).
    #[error("Export list is no longer available")]
    Unavailable,
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors while persisting the session.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("Session IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored session is not valid JSON.
    #[error("Session JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backing store cannot be reached (e.g. browser storage disabled).
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for export-list operations.
pub type ExportsResult<T> = Result<T, ExportsError>;

/// Result type for session storage.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(err.to_string().starts_with("Session JSON error"));
    }

    #[test]
    fn test_exports_error_format() {
        let err = ExportsError::IndexOutOfBounds { index: 3, len: 1 };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains("1 jobs"));
    }

    #[test]
    fn test_validation_failure_displays_message_only() {
        let failure = ValidationFailure {
            index: 2,
            message: "Invalid OTP".into(),
        };
        assert_eq!(failure.to_string(), "Invalid OTP");
    }
}
