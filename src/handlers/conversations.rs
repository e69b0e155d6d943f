// GET /chatbot/conversations and POST /chatbot/conversations/:id/delete handlers

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{error, info};
use warp::http::StatusCode;
use warp::reply::Json;

use crate::models::DeleteResponse;
use crate::service::ConversationService;

/// Wrap a JSON reply with the cache-disabling header set, so every poll of
/// the conversation list returns a fresh 200 rather than a 304
fn no_cache(json: Json, status: StatusCode) -> impl warp::Reply {
    let reply = warp::reply::with_status(json, status);
    let reply = warp::reply::with_header(reply, "Cache-Control", "no-store, no-cache, must-revalidate");
    let reply = warp::reply::with_header(reply, "Pragma", "no-cache");
    warp::reply::with_header(reply, "Expires", "0")
}

pub async fn list_conversations_handler(
    service: Arc<ConversationService>,
) -> Result<impl warp::Reply, Infallible> {
    info!("GET /chatbot/conversations");

    match service.list_conversations().await {
        Ok(summaries) => Ok(no_cache(warp::reply::json(&summaries), StatusCode::OK)),
        Err(e) => {
            error!(error = %e, "list conversations failed");
            Ok(no_cache(
                warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

pub async fn delete_conversation_handler(
    conversation_id: String,
    service: Arc<ConversationService>,
) -> Result<impl warp::Reply, Infallible> {
    info!(%conversation_id, "POST /chatbot/conversations/.../delete");

    match service.delete_conversation(&conversation_id).await {
        Ok(_removed) => Ok(warp::reply::with_status(
            warp::reply::json(&DeleteResponse {
                success: true,
                message: "Conversation deleted successfully".to_string(),
            }),
            StatusCode::OK,
        )),
        Err(e) => {
            error!(error = %e, "delete conversation failed");
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
