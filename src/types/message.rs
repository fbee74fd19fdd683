//! Chat message types sent to the Puter chat driver.

use serde::{Deserialize, Serialize};

/// A single role/content pair in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// What a caller hands to `chat`: either a bare prompt or a full conversation.
///
/// A bare prompt is sent as a single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePayload {
    Text(String),
    Messages(Vec<Message>),
}

impl MessagePayload {
    /// Normalize into the message list that goes on the wire.
    pub fn to_messages(&self) -> Vec<Message> {
        match self {
            MessagePayload::Text(text) => vec![Message::user(text.clone())],
            MessagePayload::Messages(messages) => messages.clone(),
        }
    }
}

impl From<&str> for MessagePayload {
    fn from(s: &str) -> Self {
        MessagePayload::Text(s.to_string())
    }
}

impl From<String> for MessagePayload {
    fn from(s: String) -> Self {
        MessagePayload::Text(s)
    }
}

impl From<Vec<Message>> for MessagePayload {
    fn from(messages: Vec<Message>) -> Self {
        MessagePayload::Messages(messages)
    }
}

impl From<Message> for MessagePayload {
    fn from(message: Message) -> Self {
        MessagePayload::Messages(vec![message])
    }
}
