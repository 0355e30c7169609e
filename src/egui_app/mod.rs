//! egui Native Desktop App Module
//!
//! Desktop client for the instaclone backend, built on egui/eframe.
//!
//! # Architecture
//!
//! - **`config`** - Server URL, logout delay, toast duration
//! - **`session`** - Bearer token and current user snapshot
//! - **`api`** - HTTP services, one per resource
//! - **`interceptor`** - 401 handling for every request
//! - **`guard`** - Route activation check
//! - **`feed`** - Batch loading of post details and like toggling
//! - **`chat`** - STOMP message-bus transport and chat room state
//! - **`notification`** - Toasts
//! - **`events`** - Profile-picture-changed signal
//! - **`tasks`** - Running async work for the UI thread
//! - **`state`** - Route, live view and shared services
//! - **`views`** - One module per screen
//! - **`theme`** - Colors and frames
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop app:
//! // cargo run --bin instaclone_app
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod events;
pub mod feed;
pub mod guard;
pub mod interceptor;
pub mod notification;
pub mod session;
pub mod state;
pub mod tasks;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use notification::Notifier;
pub use session::Session;
pub use state::{AppContext, AppState};
pub use types::{Navigation, Route};
