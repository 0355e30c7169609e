//! Data Model
//!
//! Plain records mirrored from the backend's REST responses. Field names
//! follow the backend's JSON (`camelCase` for posts, `ms_id`/`t_stamp`
//! for chat messages).

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder the backend overwrites with its own timestamp.
pub const SERVER_TIMESTAMP_PLACEHOLDER: &str = "to be defined in server";

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A registered user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub firstname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lastname: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl User {
    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname, self.lastname);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// A comment attached to a post
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Post this comment was fetched for; the backend does not send it
    #[serde(skip)]
    pub post_id: Option<i64>,
}

/// A published post
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub caption: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub likes: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users_liked: Vec<String>,
    /// Filled from the comment endpoint
    #[serde(skip)]
    pub comments: Vec<Comment>,
    /// Base64 image payload filled from the image endpoint
    #[serde(skip)]
    pub image: Option<String>,
}

impl Post {
    /// Whether `username` is in the like list
    pub fn is_liked_by(&self, username: &str) -> bool {
        self.users_liked.iter().any(|u| u == username)
    }

    /// Add a like. Returns false when the user already liked the post.
    pub fn add_like(&mut self, username: &str) -> bool {
        if self.is_liked_by(username) {
            return false;
        }
        self.users_liked.push(username.to_string());
        self.likes = Some(self.likes.unwrap_or(0) + 1);
        true
    }

    /// Remove a like. Returns false when the user had not liked the post.
    pub fn remove_like(&mut self, username: &str) -> bool {
        let before = self.users_liked.len();
        self.users_liked.retain(|u| u != username);
        if self.users_liked.len() == before {
            return false;
        }
        self.likes = Some((self.likes.unwrap_or(1) - 1).max(0));
        true
    }

    /// Number of likes as displayed
    pub fn like_count(&self) -> usize {
        self.users_liked.len()
    }
}

/// Body of `POST /api/post/create`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub caption: String,
    pub location: String,
}

/// Body of `POST /api/comment/{postId}/create`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub message: String,
}

/// A chat message as stored by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(rename = "ms_id", default)]
    pub id: Option<i64>,
    pub sender: String,
    #[serde(rename = "t_stamp", default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Payload published to a channel destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub sender: String,
    #[serde(rename = "t_stamp")]
    pub timestamp: String,
    pub content: String,
}

impl OutgoingMessage {
    /// The timestamp is always left for the server to fill in.
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            timestamp: SERVER_TIMESTAMP_PLACEHOLDER.to_string(),
            content: content.into(),
        }
    }
}

/// Sort messages ascending by numeric id, not by timestamp
pub fn sort_messages(messages: &mut [ChatMessage]) {
    messages.sort_by_key(|m| m.id);
}

/// Chat list entry returned by `POST /getChats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    #[serde(default)]
    pub chat_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub participant: Option<String>,
}

impl ChatSummary {
    /// The other side of a `"a&b"` channel name
    pub fn counterpart(&self, me: &str) -> Option<&str> {
        let (first, second) = self.name.split_once('&')?;
        if first == me {
            Some(second)
        } else if second == me {
            Some(first)
        } else {
            None
        }
    }
}

/// Body of `POST /getMessages`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatNameRequest {
    pub chat: String,
}

/// Image payload returned by the image endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageModel {
    #[serde(rename = "imageBytes", default)]
    pub image_bytes: Option<String>,
}

/// Body of `POST /api/auth/signin`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Successful sign-in response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: String,
}

/// Generic `{ "message": ... }` response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
