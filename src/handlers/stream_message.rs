// POST /chatbot/message/stream handler

use std::convert::Infallible;
use std::sync::Arc;

use futures_util::StreamExt;
use tracing::info;

use crate::models::SendMessageRequest;
use crate::service::ConversationService;
use crate::sse;

pub async fn stream_message_handler(
    request: SendMessageRequest,
    service: Arc<ConversationService>,
) -> Result<impl warp::Reply, Infallible> {
    info!(conversation_id = %request.conversation_id, "POST /chatbot/message/stream");

    // The service emits ordered chat events; this layer only maps them onto
    // SSE frames. The connection closes after the terminal event.
    let event_stream = service
        .send_message_streamed(request.conversation_id, request.message)
        .map(|event| sse::chat_event(&event));

    Ok(warp::sse::reply(
        warp::sse::keep_alive().stream(event_stream),
    ))
}
