//! Property-based tests

mod channel_proptest;
mod like_proptest;
mod message_proptest;
