//! Domain error types
//!
//! The error hierarchy for catsync. All errors are domain-specific and don't
//! expose third-party types from the HTTP client or serializers.

use thiserror::Error;

/// Main catsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Feed API errors (source side)
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Import API errors (target side)
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Source record validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Attribute projection errors
    #[error("Attribute '{name}' could not be parsed: {reason}")]
    AttributeParse { name: String, reason: String },

    /// Cursor state errors
    #[error("State error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The run was cancelled by a shutdown signal
    #[error("Sync cancelled by shutdown signal")]
    Cancelled,
}

/// Feed API errors
///
/// Errors that occur when fetching pages from the source feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to connect to the feed endpoint
    #[error("Failed to connect to feed: {0}")]
    ConnectionFailed(String),

    /// Token acquisition failed
    #[error("Feed authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body could not be decoded
    #[error("Invalid response from feed: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Feed server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Feed client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

/// Import API errors
///
/// Errors that occur when talking to the staged import API.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to connect to the import API
    #[error("Failed to connect to import API: {0}")]
    ConnectionFailed(String),

    /// Response body could not be decoded
    #[error("Invalid response from import API: {0}")]
    InvalidResponse(String),

    /// Container lookup returned an unexpected status
    #[error("Container lookup for '{key}' failed: {status} - {message}")]
    ContainerLookupFailed {
        key: String,
        status: u16,
        message: String,
    },

    /// Container creation failed
    #[error("Failed to create import container '{key}': {message}")]
    ContainerCreationFailed { key: String, message: String },

    /// A sub-batch submission was rejected
    #[error("Submission to container '{key}' failed: {status} - {message}")]
    SubmissionFailed {
        key: String,
        status: u16,
        message: String,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
