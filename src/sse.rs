use std::convert::Infallible;
use warp::sse::Event;

use crate::models::ChatEvent;

/// Serialize a chat event into an SSE frame
///
/// The wire contract is data-only: every frame is `data: <JSON>\n\n` where
/// the JSON carries a `type` discriminator. The transport forwards service
/// events verbatim; nothing is added or reordered here.
pub fn chat_event(event: &ChatEvent) -> Result<Event, Infallible> {
    let payload = serde_json::to_string(event)
        .unwrap_or_else(|_| r#"{"type":"error","message":"serialization failed","error":""}"#.to_string());

    Ok(Event::default().data(payload))
}
