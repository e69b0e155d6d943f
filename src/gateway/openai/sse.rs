//! Server-Sent Events (SSE) parser for streaming completion responses

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use crate::gateway::error::GatewayError;

use super::types::ChatCompletionChunk;

/// Parse a stream of bytes as chat-completion SSE chunks
///
/// The provider's SSE format is data-only:
/// ```text
/// data: {"choices":[{"delta":{"content":"Hel"}}]}
///
/// data: {"choices":[{"delta":{"content":"lo"}}]}
///
/// data: [DONE]
/// ```
///
/// This parser:
/// 1. Buffers incoming bytes
/// 2. Scans for event boundaries (double newline)
/// 3. Extracts and parses JSON from the `data:` line
/// 4. Swallows the `[DONE]` sentinel; the stream ends with the connection
pub fn parse_sse_stream(
    byte_stream: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
) -> Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, GatewayError>> + Send>> {
    // Buffer to accumulate partial events
    let mut buffer = String::new();

    let chunk_stream = byte_stream.flat_map(move |chunk_result| {
        let chunk = match chunk_result {
            Ok(bytes) => bytes,
            Err(e) => {
                return futures::stream::iter(vec![Err(GatewayError::Stream(e.to_string()))]);
            }
        };

        let text = match std::str::from_utf8(&chunk) {
            Ok(t) => t,
            Err(e) => {
                return futures::stream::iter(vec![Err(GatewayError::Stream(format!(
                    "Invalid UTF-8 in stream: {}",
                    e
                )))]);
            }
        };

        buffer.push_str(text);

        // Process complete events (delimited by \n\n)
        let mut chunks = Vec::new();
        while let Some(event_end) = buffer.find("\n\n") {
            let event_text = buffer[..event_end].to_string();
            buffer.drain(..=event_end + 1);

            if let Some(parsed) = parse_event(&event_text) {
                chunks.push(parsed);
            }
        }

        futures::stream::iter(chunks)
    });

    Box::pin(chunk_stream)
}

/// Parse a single SSE event from its text representation
fn parse_event(event_text: &str) -> Option<Result<ChatCompletionChunk, GatewayError>> {
    let mut data: Option<String> = None;

    for line in event_text.lines() {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(data_val) = line.strip_prefix("data:") {
            data = Some(data_val.trim().to_string());
        }
    }

    let data = data?;

    // Keep-alive comments produce no data; [DONE] marks normal termination
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    match serde_json::from_str::<ChatCompletionChunk>(&data) {
        Ok(chunk) => Some(Ok(chunk)),
        Err(e) => Some(Err(GatewayError::Serialization(format!(
            "Failed to parse completion chunk: {}. Data: {}",
            e, data
        )))),
    }
}
