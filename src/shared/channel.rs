//! Chat channel naming
//!
//! Two users always land on the same channel, whoever opens the chat.

use std::fmt;

/// One side of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant<'a> {
    pub id: i64,
    pub username: &'a str,
}

impl<'a> Participant<'a> {
    pub fn new(id: i64, username: &'a str) -> Self {
        Self { id, username }
    }
}

/// Canonical channel identifier for a pair of users
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelName(String);

impl ChannelName {
    /// The participant with the higher id comes first. Equal ids fall back
    /// to comparing usernames so the result stays symmetric.
    pub fn between(me: Participant<'_>, other: Participant<'_>) -> Self {
        if (me.id, me.username) > (other.id, other.username) {
            Self(format!("{}&{}", me.username, other.username))
        } else {
            Self(format!("{}&{}", other.username, me.username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Topic the server publishes change signals to
    pub fn topic(&self) -> String {
        format!("/topic/messages/{}", self.0)
    }

    /// Destination new messages are published to
    pub fn destination(&self) -> String {
        format!("/app/chat/{}", self.0)
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
