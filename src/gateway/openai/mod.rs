//! OpenAI-compatible provider implementation

pub mod client;
pub mod sse;
pub mod types;

pub use client::{OpenAiClient, FALLBACK_REPLY};
