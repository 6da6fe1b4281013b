//! Error types for the discovery module

use std::fmt;

/// Errors that can occur while querying the search service
#[derive(Debug)]
pub enum DiscoveryError {
    /// The request could not be sent or timed out
    Request(String),

    /// The service answered with a non-success status
    Status { status: u16, body: String },

    /// The response body could not be decoded
    Decode(String),

    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "Request failed: {msg}"),
            Self::Status { status, body } => {
                write!(f, "Service returned status {status}: {body}")
            }
            Self::Decode(msg) => write!(f, "Failed to decode response: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for DiscoveryError {}

impl From<DiscoveryError> for searcheval_core::error::Error {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::ConfigError(msg) => searcheval_core::error::Error::Config(msg),
            other => searcheval_core::error::Error::Search(other.to_string()),
        }
    }
}
