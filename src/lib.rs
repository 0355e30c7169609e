//! Instaclone - Desktop Client Library
//!
//! A native client for the instaclone photo-sharing backend: sign-in and
//! registration, a feed with likes and comments, post and profile image
//! uploads, and direct chat over a STOMP message bus.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic pieces
//!   - Wire models, channel names, validation, display helpers
//!   - Config file loading
//!   - Error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Session, HTTP services and the 401 interceptor
//!   - Feed loading and chat transport
//!   - Views
//!
//! # Error Handling
//!
//! - `ApiError` for everything that talks to the server
//! - `SharedError` for local failures (validation, decoding, config)
//!
//! # Thread Safety
//!
//! - **Services**: cloneable handles over `Arc`; safe to move into tasks
//! - **Native**: egui runs on one thread and polls background work each frame

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
