//! End-to-end tests for the HTTP surface
//!
//! Routes are exercised with `warp::test` against a real Postgres container
//! and a canned completion gateway.

mod common;

use std::sync::Arc;

use chatbot_server::models::ChatEvent;
use chatbot_server::routes::configure_routes;
use chatbot_server::service::ConversationService;
use common::CannedGateway;
use testcontainers::clients::Cli;
use testcontainers::{Container, GenericImage};

async fn build_service(
    docker: &Cli,
    gateway: CannedGateway,
) -> (Arc<ConversationService>, Container<'_, GenericImage>) {
    let container = docker.run(common::create_postgres_container());
    let host_port = container.get_host_port_ipv4(common::POSTGRES_PORT);
    let store = common::connect("127.0.0.1", host_port).await;

    let service = Arc::new(ConversationService::new(
        Arc::new(store),
        Box::new(gateway),
    ));

    (service, container)
}

/// Split an SSE body into its parsed `data:` payloads
fn parse_sse_body(body: &str) -> Vec<ChatEvent> {
    body.split("\n\n")
        .filter_map(|frame| frame.trim().strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim()).expect("valid event JSON"))
        .collect()
}

#[tokio::test]
async fn test_health_probe() {
    let docker = Cli::default();
    let (service, _container) =
        build_service(&docker, CannedGateway::replying(vec!["unused"])).await;
    let routes = configure_routes(service);

    let response = warp::test::request()
        .method("GET")
        .path("/chatbot/health")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_send_message_creates_two_message_history() {
    let docker = Cli::default();
    let (service, _container) =
        build_service(&docker, CannedGateway::replying(vec!["Hello ", "there!"])).await;
    let routes = configure_routes(service);

    let response = warp::test::request()
        .method("POST")
        .path("/chatbot/message")
        .json(&serde_json::json!({ "message": "hi", "conversationId": "c1" }))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["message"], "Hello there!");
    assert_eq!(body["conversationId"], "c1");
    assert!(body.get("timestamp").is_some());
    assert!(body.get("error").is_none());

    let history = warp::test::request()
        .method("GET")
        .path("/chatbot/history/c1")
        .reply(&routes)
        .await;

    assert_eq!(history.status(), 200);
    let messages: serde_json::Value = serde_json::from_slice(history.body()).unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "hi");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Hello there!");
}

#[tokio::test]
async fn test_history_for_unknown_conversation_is_empty_200() {
    let docker = Cli::default();
    let (service, _container) =
        build_service(&docker, CannedGateway::replying(vec!["unused"])).await;
    let routes = configure_routes(service);

    let response = warp::test::request()
        .method("GET")
        .path("/chatbot/history/unknown-id")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_conversation_listing_disables_caching() {
    let docker = Cli::default();
    let (service, _container) =
        build_service(&docker, CannedGateway::replying(vec!["a reply"])).await;
    let routes = configure_routes(service);

    warp::test::request()
        .method("POST")
        .path("/chatbot/message")
        .json(&serde_json::json!({ "message": "hi", "conversationId": "c1" }))
        .reply(&routes)
        .await;

    let response = warp::test::request()
        .method("GET")
        .path("/chatbot/conversations")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"],
        "no-store, no-cache, must-revalidate"
    );

    let summaries: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["conversationId"], "c1");
    assert_eq!(summaries[0]["messageCount"], 2);
    assert_eq!(summaries[0]["firstMessage"], "hi");
    assert_eq!(summaries[0]["lastMessage"], "a reply");
    assert_eq!(summaries[0]["lastMessageRole"], "assistant");
}

#[tokio::test]
async fn test_delete_conversation_endpoint() {
    let docker = Cli::default();
    let (service, _container) =
        build_service(&docker, CannedGateway::replying(vec!["a reply"])).await;
    let routes = configure_routes(service);

    warp::test::request()
        .method("POST")
        .path("/chatbot/message")
        .json(&serde_json::json!({ "message": "hi", "conversationId": "c1" }))
        .reply(&routes)
        .await;

    let response = warp::test::request()
        .method("POST")
        .path("/chatbot/conversations/c1/delete")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Conversation deleted successfully");

    let history = warp::test::request()
        .method("GET")
        .path("/chatbot/history/c1")
        .reply(&routes)
        .await;
    let messages: serde_json::Value = serde_json::from_slice(history.body()).unwrap();
    assert!(messages.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_streamed_reply_emits_ordered_events_and_persists() {
    let docker = Cli::default();
    let (service, _container) =
        build_service(&docker, CannedGateway::replying(vec!["Hel", "lo", "!"])).await;
    let routes = configure_routes(service);

    let response = warp::test::request()
        .method("POST")
        .path("/chatbot/message/stream")
        .json(&serde_json::json!({ "message": "hi", "conversationId": "c1" }))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let body = String::from_utf8(response.body().to_vec()).unwrap();
    let events = parse_sse_body(&body);

    assert_eq!(events.len(), 5);
    assert!(matches!(&events[0], ChatEvent::Start { conversation_id } if conversation_id == "c1"));
    assert_eq!(
        events[1],
        ChatEvent::Content {
            content: "Hel".to_string()
        }
    );
    assert!(matches!(&events[4], ChatEvent::End { conversation_id, .. } if conversation_id == "c1"));

    // Full concatenated text was persisted as one assistant turn
    let history = warp::test::request()
        .method("GET")
        .path("/chatbot/history/c1")
        .reply(&routes)
        .await;
    let messages: serde_json::Value = serde_json::from_slice(history.body()).unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["content"], "Hello!");
}

#[tokio::test]
async fn test_aborted_stream_persists_no_assistant_message() {
    let docker = Cli::default();
    let (service, _container) = build_service(
        &docker,
        CannedGateway {
            fragments: vec!["partial ", "reply"],
            fail_after: Some(1),
        },
    )
    .await;
    let routes = configure_routes(service);

    let response = warp::test::request()
        .method("POST")
        .path("/chatbot/message/stream")
        .json(&serde_json::json!({ "message": "hi", "conversationId": "c1" }))
        .reply(&routes)
        .await;

    let body = String::from_utf8(response.body().to_vec()).unwrap();
    let events = parse_sse_body(&body);

    assert!(matches!(events[0], ChatEvent::Start { .. }));
    assert!(matches!(events.last().unwrap(), ChatEvent::Error { .. }));
    assert!(!events.iter().any(|e| matches!(e, ChatEvent::End { .. })));

    let history = warp::test::request()
        .method("GET")
        .path("/chatbot/history/c1")
        .reply(&routes)
        .await;
    let messages: serde_json::Value = serde_json::from_slice(history.body()).unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
}
