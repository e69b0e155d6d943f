//! Thin adapter to an external chat-completion API
//!
//! The [`CompletionGateway`] trait is the seam between the conversation
//! service and the provider; [`OpenAiClient`] implements it against any
//! OpenAI-compatible chat completions endpoint, in blocking and streaming
//! modes.

pub mod config;
pub mod error;
pub mod openai;
pub mod provider;
pub mod types;

pub use config::GenerationConfig;
pub use error::GatewayError;
pub use openai::OpenAiClient;
pub use provider::{CompletionGateway, FragmentStream};
pub use types::{Turn, TurnRole};
