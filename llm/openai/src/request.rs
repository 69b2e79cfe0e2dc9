//! Request body for the OpenAI-compatible chat completions API.

use llm::{Message, Role};
use serde::Serialize;
use serde_json::{Value, json};

/// A message flattened to the wire shape: role plus plain text content.
///
/// The wire format wants a single string, so all text parts of a message
/// concatenate in order with no separator. Empty content is sent as a
/// single space; some compatible services reject empty message content.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// The role of the message.
    pub role: Role,
    /// The flattened text content.
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let text = message.flatten();
        Self {
            role: message.role,
            content: if text.is_empty() { " ".into() } else { text },
        }
    }
}

/// The request body for the chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model to use.
    pub model: String,

    /// The messages to send.
    pub messages: Vec<ChatMessage>,

    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Stream options; set to request the final usage chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<Value>,
}

impl Request {
    /// Build a request body from internal messages.
    ///
    /// An empty conversation is replaced with the default user message
    /// rather than sent empty.
    pub fn new(model: &str, messages: &[Message]) -> Self {
        let messages = if messages.is_empty() {
            vec![ChatMessage::from(&Message::hello())]
        } else {
            messages.iter().map(ChatMessage::from).collect()
        };
        Self {
            model: model.to_owned(),
            messages,
            stream: None,
            stream_options: None,
        }
    }

    /// Enable streaming, requesting the final usage chunk.
    pub fn stream(mut self) -> Self {
        self.stream = Some(true);
        self.stream_options = Some(json!({ "include_usage": true }));
        self
    }
}
