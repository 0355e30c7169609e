//! Shared Error Types
//!
//! This module defines the error types used across the client.
//!
//! # Error Categories
//!
//! - `SharedError` - local failures: form validation, JSON serialization,
//!   image decoding
//! - `ApiError` - failures talking to the backend over HTTP or the
//!   chat message bus
//!
//! # Usage
//!
//! ```rust
//! use instaclone::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email format");
//! ```
use thiserror::Error;

/// Local errors that never involve the network
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Form or data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Image payload could not be decoded
    #[error("Image error: {message}")]
    ImageError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new image error
    pub fn image(message: impl Into<String>) -> Self {
        Self::ImageError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Errors returned by the HTTP service layer and the chat transport.
///
/// Every variant carries owned strings so results can be cloned into
/// several view slots.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No session token is available for an authenticated call
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server answered 401; the session is being torn down
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-success HTTP status
    #[error("Request failed: {status} - {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Chat message-bus failure
    #[error("Chat transport error: {0}")]
    Transport(String),

    /// A local precondition failed before any request was sent
    #[error(transparent)]
    Local(#[from] SharedError),
}

impl ApiError {
    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
