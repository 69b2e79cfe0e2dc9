//! Non-streaming response bodies for the Anthropic Messages API.

use llm::{FinishReason, Usage};
use serde::Deserialize;

/// A non-streaming message response.
#[derive(Debug, Deserialize)]
pub struct Completion {
    /// The generated content blocks.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// The vendor stop reason string.
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Vendor-reported token usage.
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

/// One content block of a message.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Answer text.
    Text {
        /// The text value.
        text: String,
    },
    /// Extended-thinking text.
    Thinking {
        /// The thinking value.
        thinking: String,
    },
    /// Any block kind this adapter does not carry.
    #[serde(other)]
    Unknown,
}

/// Vendor-reported token usage.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct WireUsage {
    /// Prompt-side tokens.
    #[serde(default)]
    pub input_tokens: u32,
    /// Completion-side tokens.
    #[serde(default)]
    pub output_tokens: u32,
}

impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        Self {
            prompt_tokens: usage.input_tokens,
            completion_tokens: usage.output_tokens,
        }
    }
}

/// Map a vendor stop reason string. Unknown reasons collapse to `Other`,
/// never to `Stop`.
pub fn stop_reason(reason: &str) -> FinishReason {
    match reason {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::Length,
        _ => FinishReason::Other,
    }
}
