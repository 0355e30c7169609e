//! Test suite for the instaclone client
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
