//! SSE event parsing for the Anthropic streaming Messages API.
//!
//! Anthropic streaming events differ from the OpenAI chunk format:
//! - `message_start` carries initial metadata and the prompt-side usage
//! - `content_block_start` begins a content block
//! - `content_block_delta` carries incremental text or thinking content
//! - `content_block_stop` ends a content block
//! - `message_delta` carries the final stop reason and output usage
//! - `message_stop` ends the message

use serde::Deserialize;

/// A raw SSE event from the streaming Messages API.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Initial message metadata.
    MessageStart {
        /// The message envelope.
        message: MessageMeta,
    },
    /// Begin a content block.
    ContentBlockStart {
        /// The opening block, possibly already carrying text.
        content_block: StartBlock,
    },
    /// Incremental content within a block.
    ContentBlockDelta {
        /// The delta payload.
        delta: BlockDelta,
    },
    /// End of a content block.
    ContentBlockStop {},
    /// Final message delta (stop reason and output usage).
    MessageDelta {
        /// The stop reason envelope.
        delta: MessageDeltaBody,
        /// Output-side usage.
        #[serde(default)]
        usage: MessageDeltaUsage,
    },
    /// End of message.
    MessageStop,
    /// Keep-alive.
    Ping,
    /// Catch-all for unknown event types.
    #[serde(other)]
    Unknown,
}

/// Initial message metadata.
#[derive(Debug, Deserialize)]
pub struct MessageMeta {
    /// Usage known at message start (prompt-side tokens).
    #[serde(default)]
    pub usage: Option<StartUsage>,
}

/// Usage reported at `message_start`.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct StartUsage {
    /// Prompt-side tokens.
    #[serde(default)]
    pub input_tokens: u32,
}

/// The opening block of `content_block_start`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StartBlock {
    /// A text block, possibly with initial text.
    Text {
        /// Initial text, usually empty.
        text: String,
    },
    /// An extended-thinking block.
    Thinking {
        /// Initial thinking text, usually empty.
        thinking: String,
    },
    /// Any block kind this adapter does not carry.
    #[serde(other)]
    Unknown,
}

/// Incremental content within a block.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockDelta {
    /// Answer text.
    TextDelta {
        /// The text fragment.
        text: String,
    },
    /// Extended-thinking text.
    ThinkingDelta {
        /// The thinking fragment.
        thinking: String,
    },
    /// Any delta kind this adapter does not carry.
    #[serde(other)]
    Unknown,
}

/// The stop reason envelope of `message_delta`.
#[derive(Debug, Deserialize)]
pub struct MessageDeltaBody {
    /// The vendor stop reason string, if reported.
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Output usage reported at `message_delta`.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct MessageDeltaUsage {
    /// Completion-side tokens.
    #[serde(default)]
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_delta() {
        let event: Event = serde_json::from_str(
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#,
        )
        .unwrap();
        match event {
            Event::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
            } => assert_eq!(text, "Hi"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn parses_thinking_delta() {
        let event: Event = serde_json::from_str(
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"thinking_delta","thinking":"hmm"}}"#,
        )
        .unwrap();
        match event {
            Event::ContentBlockDelta {
                delta: BlockDelta::ThinkingDelta { thinking },
            } => assert_eq!(thinking, "hmm"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn parses_message_delta_with_stop_reason_and_usage() {
        let event: Event = serde_json::from_str(
            r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":7}}"#,
        )
        .unwrap();
        match event {
            Event::MessageDelta { delta, usage } => {
                assert_eq!(delta.stop_reason.as_deref(), Some("end_turn"));
                assert_eq!(usage.output_tokens, 7);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_event_types_do_not_fail_parsing() {
        let event: Event =
            serde_json::from_str(r#"{"type":"content_block_heartbeat"}"#).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
