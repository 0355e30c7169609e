use crate::shared::channel::{ChannelName, Participant};
use crate::shared::error::SharedError;
use crate::shared::models::{sort_messages, ChatMessage, User};

/// A two-person conversation and its loaded history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    channel: ChannelName,
    me: User,
    other: User,
    messages: Vec<ChatMessage>,
}

impl ChatRoom {
    /// Both users need an id; the channel name is derived from them.
    pub fn new(me: &User, other: &User) -> Result<Self, SharedError> {
        let (Some(my_id), Some(other_id)) = (me.id, other.id) else {
            return Err(SharedError::validation("id", "Both users need an id to chat"));
        };
        let channel = ChannelName::between(
            Participant::new(my_id, &me.username),
            Participant::new(other_id, &other.username),
        );
        Ok(Self {
            channel,
            me: me.clone(),
            other: other.clone(),
            messages: Vec::new(),
        })
    }

    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    pub fn me(&self) -> &User {
        &self.me
    }

    pub fn other(&self) -> &User {
        &self.other
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Replace the history with a fresh fetch, in ascending id order
    pub fn replace_history(&mut self, mut messages: Vec<ChatMessage>) {
        sort_messages(&mut messages);
        self.messages = messages;
    }

    pub fn is_own(&self, message: &ChatMessage) -> bool {
        message.sender == self.me.username
    }
}
