//! Streaming generation events.

use crate::{FinishReason, Usage};
use serde::{Deserialize, Serialize};

/// One event in a streaming generation.
///
/// A well-formed stream yields zero or more `TextDelta` items followed by
/// exactly one terminal item: a `Done` event, or the stream-level `Err`
/// carrying the failure. Nothing follows the terminal item. Streams are
/// forward-only; a consumed stream cannot be replayed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Incremental content.
    TextDelta {
        /// Text appended to the answer channel.
        value: String,

        /// Text appended to the auxiliary reasoning channel.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reasoning: Option<String>,
    },

    /// Terminal event for a successfully completed stream.
    Done {
        /// Why generation stopped.
        finish_reason: FinishReason,
        /// Token usage for the request.
        usage: Usage,
    },
}

impl StreamEvent {
    /// A delta carrying answer text only.
    pub fn text(value: impl Into<String>) -> Self {
        Self::TextDelta {
            value: value.into(),
            reasoning: None,
        }
    }

    /// A delta carrying reasoning-channel text only.
    pub fn reasoning(value: impl Into<String>) -> Self {
        Self::TextDelta {
            value: String::new(),
            reasoning: Some(value.into()),
        }
    }

    /// The terminal event of a successful stream.
    pub fn done(finish_reason: FinishReason, usage: Usage) -> Self {
        Self::Done {
            finish_reason,
            usage,
        }
    }

    /// Answer text of a delta, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::TextDelta { value, .. } if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    /// Reasoning-channel text of a delta, if any.
    pub fn reasoning_content(&self) -> Option<&str> {
        match self {
            Self::TextDelta {
                reasoning: Some(reasoning),
                ..
            } if !reasoning.is_empty() => Some(reasoning),
            _ => None,
        }
    }

    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}
