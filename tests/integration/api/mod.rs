//! API integration tests
//!
//! HTTP services against a wiremock backend

mod auth_test;
mod chat_test;
mod feed_test;
mod interceptor_test;
