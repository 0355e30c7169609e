//! Integration tests against mock servers

pub mod api;
pub mod realtime;
