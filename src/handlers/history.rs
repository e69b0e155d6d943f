// GET /chatbot/history/:conversationId handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{error, info};
use warp::http::StatusCode;

use crate::service::ConversationService;

pub async fn get_history_handler(
    conversation_id: String,
    service: Arc<ConversationService>,
) -> Result<impl warp::Reply, Infallible> {
    info!(%conversation_id, "GET /chatbot/history");

    // An unknown conversation is an empty history, not an error
    let (body, status) = match service.get_history(&conversation_id).await {
        Ok(history) => (warp::reply::json(&history), StatusCode::OK),
        Err(e) => {
            error!(error = %e, "get history failed");
            (
                warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };

    let reply = warp::reply::with_status(body, status);
    let reply = warp::reply::with_header(reply, "Cache-Control", "no-store, no-cache, must-revalidate");
    let reply = warp::reply::with_header(reply, "Pragma", "no-cache");
    Ok(warp::reply::with_header(reply, "Expires", "0"))
}
