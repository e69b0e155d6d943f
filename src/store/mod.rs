//! Persisted collection of chat messages, keyed by a caller-supplied
//! conversation identifier
//!
//! The store is append-only: messages are created on every user send and
//! every completed assistant reply, deleted in bulk with their conversation,
//! and never mutated in place. Conversations are not stored entities; they
//! exist only as the grouping key over messages.

pub mod client;
pub mod connection;
pub mod error;
pub mod operations;
pub mod types;

pub use client::PostgresStore;
pub use connection::StoreConfig;
pub use error::{Result, StoreError};
pub use types::{ConversationSummary, Message, Role};

use async_trait::async_trait;

/// Operations on the message collection
///
/// Trait seam so the conversation service can run against a test double;
/// [`PostgresStore`] is the production implementation.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert a new message with server-assigned timestamps
    async fn append(&self, conversation_id: &str, role: Role, content: &str) -> Result<Message>;

    /// All messages in a conversation, ascending by creation time; empty for
    /// unknown ids
    async fn list_by_conversation(&self, conversation_id: &str) -> Result<Vec<Message>>;

    /// One summary row per conversation, ordered by last activity descending
    async fn list_conversation_summaries(&self) -> Result<Vec<ConversationSummary>>;

    /// Remove all messages in a conversation; idempotent, returns rows removed
    async fn delete_conversation(&self, conversation_id: &str) -> Result<u64>;
}
