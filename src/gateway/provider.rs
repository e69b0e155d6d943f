//! Gateway trait for completion provider implementations

use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

use super::{error::GatewayError, types::Turn};

/// A lazy sequence of reply fragments, in provider arrival order
///
/// The concatenation of all fragments equals the full reply text. Fragments
/// already emitted are not retracted when the stream later fails.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GatewayError>> + Send>>;

/// Interface to an external chat-completion provider
///
/// Constructed explicitly and handed to the conversation service at
/// construction; there is no ambient provider singleton.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Request a full reply in one blocking call
    ///
    /// Returns the complete reply text, or a fallback string when the
    /// provider returns no content.
    async fn complete(&self, system_prompt: &str, history: &[Turn]) -> Result<String, GatewayError>;

    /// Request a reply as a stream of incremental text fragments
    ///
    /// The stream terminates when the provider signals completion and yields
    /// an error item if the call fails or the connection drops mid-stream.
    async fn stream_complete(
        &self,
        system_prompt: &str,
        history: &[Turn],
    ) -> Result<FragmentStream, GatewayError>;
}
