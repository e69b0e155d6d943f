//! Entity types for the message store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::error::StoreError;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human input
    User,
    /// Model output
    Assistant,
    /// Instruction prefix
    System,
}

impl Role {
    /// Get the role as a string, matching the persisted representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Parse a persisted role string
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(StoreError::Validation(format!("unknown role: {}", other))),
        }
    }
}

/// A persisted chat message
///
/// Messages are append-only: created on every user send and every completed
/// assistant reply, deleted in bulk with their conversation, never updated
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    /// Opaque grouping key; conversations exist only as this key
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived per-conversation aggregate, computed on read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_id: String,
    /// Content of the most recent message (max creation time)
    pub last_message: String,
    pub last_message_role: Role,
    pub last_message_time: DateTime<Utc>,
    pub message_count: i64,
    /// Content of the oldest message (min creation time)
    pub first_message: String,
}
