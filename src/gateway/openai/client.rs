//! OpenAI-compatible completion client

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use crate::gateway::{
    config::GenerationConfig,
    error::GatewayError,
    provider::{CompletionGateway, FragmentStream},
    types::Turn,
};

use super::sse::parse_sse_stream;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

/// Reply substituted when the provider returns a completion with no content
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";

/// Client for an OpenAI-compatible chat completions endpoint
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Provider base URL, e.g. "https://api.openai.com/v1"
    base_url: String,
    /// Bearer token
    api_key: String,
    /// Model identifier, e.g. "gpt-3.5-turbo"
    model: String,
    /// Generation parameters sent with every request
    config: GenerationConfig,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        config: GenerationConfig,
    ) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| GatewayError::Http {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            config,
        })
    }

    /// Build the chat completions endpoint URL
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build a request body from the system prompt and prior turns
    fn build_request(&self, system_prompt: &str, history: &[Turn], stream: bool) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage::from(&Turn::system(system_prompt)));
        messages.extend(history.iter().map(WireMessage::from));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream,
        }
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .http_client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

/// Pull the reply text out of a completion response, falling back when the
/// provider produced no content
fn extract_reply(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

#[async_trait]
impl CompletionGateway for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Turn],
    ) -> Result<String, GatewayError> {
        let request = self.build_request(system_prompt, history, false);

        let response = self.send(&request).await?;
        let completion: ChatCompletionResponse = response.json().await?;

        Ok(extract_reply(completion))
    }

    async fn stream_complete(
        &self,
        system_prompt: &str,
        history: &[Turn],
    ) -> Result<FragmentStream, GatewayError> {
        let request = self.build_request(system_prompt, history, true);

        let response = self.send(&request).await?;

        let byte_stream = response.bytes_stream();
        let sse_stream = parse_sse_stream(Box::pin(byte_stream));

        // Keep only chunks that carry text; pass errors through unchanged
        let fragment_stream = sse_stream.filter_map(|result| async move {
            match result {
                Ok(chunk) => chunk.fragment().map(|text| Ok(text.to_string())),
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(fragment_stream))
    }
}
