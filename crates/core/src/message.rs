//! Message and Transcript domain types.
//!
//! A transcript only ever grows: the user sends a message, and exactly one
//! assistant reply (or rejection) follows it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The end user
    User,
    /// The assistant (replies, rejections and error notices)
    Assistant,
}

/// A single immutable chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// The text content
    pub content: String,

    /// Who sent this message
    pub origin: Origin,

    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(origin: Origin, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            origin,
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Origin::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Origin::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}

/// The ordered, append-only list of messages for one chat session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Messages whose content contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Message> {
        let needle = query.trim().to_lowercase();
        self.messages
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&needle))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
