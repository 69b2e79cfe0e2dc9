//! OpenAI-compatible backend adapter.
//!
//! Covers the OpenAI API and the Grok (xAI) API, plus any other service
//! exposing the OpenAI chat completions wire format.

use llm::{Client, HttpProvider, Result};
pub use request::{ChatMessage, Request};

mod provider;
mod request;
mod response;

/// OpenAI-compatible endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
    /// Grok (xAI) chat completions.
    pub const GROK: &str = "https://api.x.ai/v1/chat/completions";
}

/// An OpenAI-compatible chat completion backend.
#[derive(Debug, Clone)]
pub struct OpenAI {
    http: HttpProvider,
}

impl OpenAI {
    /// Create a backend targeting the OpenAI API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::OPENAI)
    }

    /// Create a backend targeting the Grok (xAI) API.
    pub fn grok(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::GROK)
    }

    /// Create a backend targeting a custom OpenAI-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        Ok(Self {
            http: HttpProvider::bearer(client, key, endpoint)?,
        })
    }
}
