// POST /chatbot/message handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{error, info};
use warp::http::StatusCode;

use crate::models::SendMessageRequest;
use crate::service::ConversationService;

pub async fn send_message_handler(
    request: SendMessageRequest,
    service: Arc<ConversationService>,
) -> Result<impl warp::Reply, Infallible> {
    info!(conversation_id = %request.conversation_id, "POST /chatbot/message");

    match service
        .send_message(&request.conversation_id, &request.message)
        .await
    {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&response),
            StatusCode::OK,
        )),
        // Store failures are fatal and surface as a request failure
        Err(e) => {
            error!(error = %e, "send message failed");
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": e.to_string() })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
