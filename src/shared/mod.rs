//! Shared Module
//!
//! Platform-agnostic types: the data model mirrored from the backend,
//! channel naming, form validation, display helpers, configuration and
//! error types. Nothing in here performs I/O except config file loading.

/// Data model mirrored from the REST API
pub mod models;

/// Chat channel naming
pub mod channel;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Image and timestamp display helpers
pub mod display;

/// Form validation
pub mod validation;

pub use channel::{ChannelName, Participant};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ApiError, SharedError};
pub use models::{ChatMessage, Comment, ImageModel, Post, User};
