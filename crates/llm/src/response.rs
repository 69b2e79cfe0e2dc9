//! Completed generation results.

use serde::{Deserialize, Serialize};

/// Why the model stopped generating.
///
/// Vendor terminal signals are mapped by each adapter; a reason without a
/// defined mapping collapses to `Other`, never to `Stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished its answer.
    Stop,
    /// The output token limit was hit.
    Length,
    /// Any other vendor-reported reason.
    #[default]
    Other,
}

/// Token usage for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Usage {
    /// Tokens in the prompt side of the request.
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the generated completion.
    #[serde(default)]
    pub completion_tokens: u32,
}

impl Usage {
    /// Create a usage record.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }
}

/// A completed, non-streaming generation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationResult {
    /// The assistant's answer text.
    pub text: String,

    /// Reasoning-channel text, either split out by the reasoning
    /// middleware or reported natively by the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Why generation stopped.
    pub finish_reason: FinishReason,

    /// Token usage for the request.
    #[serde(default)]
    pub usage: Usage,
}
