//! Conversation service
//!
//! Orchestrates the message store and the completion gateway for the two
//! request shapes: a synchronous reply and an incrementally streamed reply,
//! plus conversation listing, history and deletion pass-throughs.
//!
//! A streamed request moves through Idle -> UserMessageSaved -> HistoryLoaded
//! -> Streaming -> Completed | Failed, with no retries across states. There
//! is no cross-request locking: two concurrent sends to the same conversation
//! may interleave their history reads. The store is the sole point of
//! serialization.

use std::sync::Arc;

use async_stream::stream;
use futures::stream::Stream;
use futures::StreamExt;
use pin_utils::pin_mut;
use tracing::error;

use crate::gateway::{CompletionGateway, Turn};
use crate::models::{ChatEvent, SendMessageResponse};
use crate::store::{
    ConversationSummary, Message, MessageStore, Result as StoreResult, Role,
};

/// Fixed instruction prefixed to every provider call
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Be concise and friendly.";

/// User-visible apology substituted for a failed gateway call
pub const ERROR_REPLY: &str = "Sorry, I encountered an error processing your request.";

/// Orchestrates message persistence and completion calls
pub struct ConversationService {
    store: Arc<dyn MessageStore>,
    gateway: Box<dyn CompletionGateway>,
}

impl ConversationService {
    /// Create a new service over an explicitly constructed store and gateway
    pub fn new(store: Arc<dyn MessageStore>, gateway: Box<dyn CompletionGateway>) -> Self {
        Self { store, gateway }
    }

    /// Process one user message and return the full assistant reply
    ///
    /// Appends the user message, reads the conversation history, calls the
    /// gateway in blocking mode with the history as context, appends the
    /// assistant reply, and returns it.
    ///
    /// A gateway failure degrades the content rather than failing the
    /// request: the response carries an apology and the error detail, and no
    /// assistant message is persisted. Store failures propagate.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        user_text: &str,
    ) -> StoreResult<SendMessageResponse> {
        self.store
            .append(conversation_id, Role::User, user_text)
            .await?;

        let history = self.store.list_by_conversation(conversation_id).await?;
        let turns = to_turns(&history);

        match self.gateway.complete(SYSTEM_PROMPT, &turns).await {
            Ok(reply) => {
                let assistant = self
                    .store
                    .append(conversation_id, Role::Assistant, &reply)
                    .await?;

                Ok(SendMessageResponse {
                    message: reply,
                    conversation_id: conversation_id.to_string(),
                    timestamp: Some(assistant.created_at),
                    error: None,
                })
            }
            Err(e) => {
                error!(%conversation_id, error = %e, "completion call failed");

                Ok(SendMessageResponse {
                    message: ERROR_REPLY.to_string(),
                    conversation_id: conversation_id.to_string(),
                    timestamp: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }

    /// Process one user message, emitting the assistant reply incrementally
    ///
    /// The returned stream yields, in strict order: one `start` event, zero
    /// or more `content` events (one fragment each, in arrival order), then
    /// either one `end` event on success or one `error` event on failure.
    ///
    /// The assistant message is persisted only after the stream completes,
    /// from the full concatenated text. If the stream fails partway, nothing
    /// further is saved: stored history never contains a truncated assistant
    /// turn.
    pub fn send_message_streamed(
        self: Arc<Self>,
        conversation_id: String,
        user_text: String,
    ) -> impl Stream<Item = ChatEvent> + Send {
        stream! {
            if let Err(e) = self
                .store
                .append(&conversation_id, Role::User, &user_text)
                .await
            {
                error!(%conversation_id, error = %e, "failed to save user message");
                yield error_event(e.to_string());
                return;
            }

            let history = match self.store.list_by_conversation(&conversation_id).await {
                Ok(history) => history,
                Err(e) => {
                    error!(%conversation_id, error = %e, "failed to load history");
                    yield error_event(e.to_string());
                    return;
                }
            };
            let turns = to_turns(&history);

            yield ChatEvent::Start {
                conversation_id: conversation_id.clone(),
            };

            let fragments = match self.gateway.stream_complete(SYSTEM_PROMPT, &turns).await {
                Ok(fragments) => fragments,
                Err(e) => {
                    error!(%conversation_id, error = %e, "completion stream failed to start");
                    yield error_event(e.to_string());
                    return;
                }
            };

            let mut full_reply = String::new();

            pin_mut!(fragments);

            while let Some(fragment) = fragments.next().await {
                match fragment {
                    Ok(text) => {
                        full_reply.push_str(&text);
                        yield ChatEvent::Content { content: text };
                    }
                    Err(e) => {
                        error!(%conversation_id, error = %e, "completion stream interrupted");
                        yield error_event(e.to_string());
                        return;
                    }
                }
            }

            // Stream complete: persist the assistant turn from the full text
            match self
                .store
                .append(&conversation_id, Role::Assistant, &full_reply)
                .await
            {
                Ok(assistant) => {
                    yield ChatEvent::End {
                        conversation_id: conversation_id.clone(),
                        timestamp: assistant.created_at,
                    };
                }
                Err(e) => {
                    error!(%conversation_id, error = %e, "failed to save assistant message");
                    yield error_event(e.to_string());
                }
            }
        }
    }

    /// One summary per conversation, most recent activity first
    pub async fn list_conversations(&self) -> StoreResult<Vec<ConversationSummary>> {
        self.store.list_conversation_summaries().await
    }

    /// Full message history for a conversation, oldest first
    pub async fn get_history(&self, conversation_id: &str) -> StoreResult<Vec<Message>> {
        self.store.list_by_conversation(conversation_id).await
    }

    /// Remove a conversation's messages; returns the number removed
    pub async fn delete_conversation(&self, conversation_id: &str) -> StoreResult<u64> {
        self.store.delete_conversation(conversation_id).await
    }
}

/// Map stored history into prompt turns, preserving order
fn to_turns(history: &[Message]) -> Vec<Turn> {
    history
        .iter()
        .map(|message| Turn {
            role: match message.role {
                Role::User => crate::gateway::TurnRole::User,
                Role::Assistant => crate::gateway::TurnRole::Assistant,
                Role::System => crate::gateway::TurnRole::System,
            },
            content: message.content.clone(),
        })
        .collect()
}

fn error_event(detail: String) -> ChatEvent {
    ChatEvent::Error {
        message: ERROR_REPLY.to_string(),
        error: detail,
    }
}
