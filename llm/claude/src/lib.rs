//! Anthropic Messages API backend adapter.

use llm::{Client, HttpProvider, Result};
pub use request::{ChatMessage, Request};

mod provider;
mod request;
mod response;
mod stream;

/// Anthropic endpoint URLs.
pub mod endpoint {
    /// Anthropic Messages API.
    pub const ANTHROPIC: &str = "https://api.anthropic.com/v1/messages";
}

/// The API version header value the Messages API requires.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// An Anthropic Messages API backend.
#[derive(Debug, Clone)]
pub struct Claude {
    http: HttpProvider,
}

impl Claude {
    /// Create a backend targeting the Anthropic API.
    pub fn anthropic(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, endpoint::ANTHROPIC)
    }

    /// Create a backend targeting a custom Messages-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        Ok(Self {
            http: HttpProvider::custom_header(client, "x-api-key", key, endpoint)?
                .header("anthropic-version", ANTHROPIC_VERSION)?,
        })
    }
}
