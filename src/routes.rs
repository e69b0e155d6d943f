// Route definitions for the chatbot resource

use std::convert::Infallible;
use std::sync::Arc;

use warp::Filter;

use crate::handlers;
use crate::service::ConversationService;

/// Inject the shared conversation service into a filter chain
fn with_service(
    service: Arc<ConversationService>,
) -> impl Filter<Extract = (Arc<ConversationService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

pub fn configure_routes(
    service: Arc<ConversationService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let chatbot = warp::path("chatbot");

    // POST /chatbot/message
    let send_message = chatbot
        .and(warp::path("message"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(handlers::send_message_handler);

    // POST /chatbot/message/stream
    let stream_message = chatbot
        .and(warp::path("message"))
        .and(warp::path("stream"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(handlers::stream_message_handler);

    // GET /chatbot/conversations
    let list_conversations = chatbot
        .and(warp::path("conversations"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handlers::list_conversations_handler);

    // GET /chatbot/history/{conversationId}
    let get_history = chatbot
        .and(warp::path("history"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handlers::get_history_handler);

    // POST /chatbot/conversations/{conversationId}/delete
    let delete_conversation = chatbot
        .and(warp::path("conversations"))
        .and(warp::path::param::<String>())
        .and(warp::path("delete"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_service(service))
        .and_then(handlers::delete_conversation_handler);

    // GET /chatbot/health
    let health = chatbot
        .and(warp::path("health"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // The frontends are served cross-origin
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    send_message
        .or(stream_message)
        .or(list_conversations)
        .or(get_history)
        .or(delete_conversation)
        .or(health)
        .with(cors)
}
