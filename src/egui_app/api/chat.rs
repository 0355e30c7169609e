use super::ApiClient;
use crate::shared::channel::ChannelName;
use crate::shared::error::ApiError;
use crate::shared::models::{sort_messages, ChatMessage, ChatNameRequest, ChatSummary};
use reqwest::Method;

/// Chat history over REST; live signals come from the chat transport.
#[derive(Debug, Clone)]
pub struct ChatApi {
    api: ApiClient,
}

impl ChatApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /getMessages`, returned in display order (ascending id)
    pub async fn messages(&self, channel: &ChannelName) -> Result<Vec<ChatMessage>, ApiError> {
        let body = ChatNameRequest {
            chat: channel.as_str().to_string(),
        };
        let builder = self.api.request(Method::POST, "/getMessages").json(&body);
        let mut messages: Vec<ChatMessage> = self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default();
        sort_messages(&mut messages);
        tracing::debug!("[CHAT] Loaded {} messages for {}", messages.len(), channel);
        Ok(messages)
    }

    /// `POST /getChats` with the raw username as body
    pub async fn chats(&self, username: &str) -> Result<Vec<ChatSummary>, ApiError> {
        let builder = self
            .api
            .request(Method::POST, "/getChats")
            .body(username.to_string());
        Ok(self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default())
    }
}
