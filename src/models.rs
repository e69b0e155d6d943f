// Wire types for the chatbot HTTP surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /chatbot/message` and `POST /chatbot/message/stream`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    pub conversation_id: String,
}

/// Reply to a synchronous send
///
/// On success `timestamp` is set and `error` absent; on a gateway failure the
/// reply degrades to an apology with `error` set and no timestamp. Either way
/// the caller gets a normal-looking response, never a transport error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub message: String,
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Events emitted during a streamed reply, in strict order: one `start`,
/// zero or more `content`, then one `end` or one `error`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatEvent {
    #[serde(rename_all = "camelCase")]
    Start { conversation_id: String },
    Content { content: String },
    #[serde(rename_all = "camelCase")]
    End {
        conversation_id: String,
        timestamp: DateTime<Utc>,
    },
    Error { message: String, error: String },
}

/// Reply to `POST /chatbot/conversations/:conversationId/delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Reply to `GET /chatbot/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
