//! Chat message data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a message in a session log
///
/// Server-assigned and locally synthesized ids live in separate namespaces,
/// so a provisional message can never be confused with a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MessageId {
    /// Assigned by the backend
    Remote(i64),
    /// Allocated by the client for messages not yet confirmed
    Local(u64),
}

impl MessageId {
    /// Check if the id was allocated locally
    pub fn is_local(&self) -> bool {
        matches!(self, MessageId::Local(_))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Remote(id) => write!(f, "{}", id),
            MessageId::Local(n) => write!(f, "local-{}", n),
        }
    }
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Assistant,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier
    pub id: MessageId,
    /// Message author
    pub role: Role,
    /// Message content
    pub content: String,
    /// Message timestamp
    pub created_at: DateTime<Utc>,
    /// Free-form origin tag
    pub created_by: String,
}

impl ChatMessage {
    /// Create a user message stamped with the current time
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
            created_by: "user".to_string(),
        }
    }

    /// Create an assistant message stamped with the current time
    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
            created_by: "assistant".to_string(),
        }
    }

    /// Check if the message has not been confirmed by the server
    pub fn is_provisional(&self) -> bool {
        self.id.is_local()
    }
}
