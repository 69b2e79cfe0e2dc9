//! Response bodies for the OpenAI-compatible chat completions API.

use llm::{FinishReason, Usage};
use serde::Deserialize;

/// A non-streaming completion response.
#[derive(Debug, Deserialize)]
pub struct Completion {
    /// The completion choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Vendor-reported token usage.
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,
    /// The vendor finish reason string.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message of a completion choice.
#[derive(Debug, Deserialize, Default)]
pub struct ChoiceMessage {
    /// The answer content.
    #[serde(default)]
    pub content: Option<String>,
    /// Native reasoning content, reported by reasoning-capable services.
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

/// A streaming chat completion chunk.
#[derive(Debug, Deserialize, Default)]
pub struct Chunk {
    /// The choices with delta content. Empty on the usage-only chunk.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    /// Token usage, present only on the final chunk when requested.
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

impl Chunk {
    /// The answer delta of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .filter(|content| !content.is_empty())
    }

    /// The reasoning delta of the first choice, if any.
    pub fn reasoning(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.reasoning_content.as_deref())
            .filter(|reasoning| !reasoning.is_empty())
    }

    /// The mapped finish reason of the first choice, if reported.
    pub fn finish(&self) -> Option<FinishReason> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
            .map(finish_reason)
    }
}

/// One streaming choice.
#[derive(Debug, Deserialize, Default)]
pub struct ChunkChoice {
    /// The incremental content.
    #[serde(default)]
    pub delta: Delta,
    /// The vendor finish reason string.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental content within a streaming choice.
#[derive(Debug, Deserialize, Default)]
pub struct Delta {
    /// Answer text.
    #[serde(default)]
    pub content: Option<String>,
    /// Native reasoning text.
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

/// Vendor-reported token usage.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct WireUsage {
    /// Prompt-side tokens.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion-side tokens.
    #[serde(default)]
    pub completion_tokens: u32,
}

impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        }
    }
}

/// Map a vendor finish reason string. Unknown reasons collapse to
/// `Other`, never to `Stop`.
pub fn finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        _ => FinishReason::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_finish_reasons_collapse_to_other() {
        assert_eq!(finish_reason("stop"), FinishReason::Stop);
        assert_eq!(finish_reason("length"), FinishReason::Length);
        assert_eq!(finish_reason("content_filter"), FinishReason::Other);
        assert_eq!(finish_reason("tool_calls"), FinishReason::Other);
    }
}
