//! Request body for the Anthropic Messages API.

use llm::{Message, Role};
use serde::Serialize;

/// Output token cap. The Messages API requires an explicit `max_tokens`.
const MAX_TOKENS: u32 = 4096;

/// A message flattened to the wire shape.
///
/// Only `user` and `assistant` roles exist on this wire; system messages
/// lift into the request's top-level `system` field. Empty content is
/// sent as a single space, the API rejects empty text.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// The role of the message.
    pub role: Role,
    /// The flattened text content.
    pub content: String,
}

/// The request body for the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model to use.
    pub model: String,

    /// Output token cap.
    pub max_tokens: u32,

    /// The system prompt, collected from system-role messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl Request {
    /// Build a Messages API body from internal messages.
    ///
    /// System messages join into the top-level `system` field. If no
    /// user/assistant messages remain, the default user message is
    /// substituted rather than sending an empty conversation.
    pub fn new(model: &str, messages: &[Message]) -> Self {
        let mut system: Option<String> = None;
        let mut chat = Vec::with_capacity(messages.len());

        for message in messages {
            let text = message.flatten();
            match message.role {
                Role::System => match &mut system {
                    Some(prompt) => {
                        prompt.push('\n');
                        prompt.push_str(&text);
                    }
                    None => system = Some(text),
                },
                Role::User | Role::Assistant => chat.push(ChatMessage {
                    role: message.role,
                    content: if text.is_empty() { " ".into() } else { text },
                }),
            }
        }

        if chat.is_empty() {
            chat.push(ChatMessage {
                role: Role::User,
                content: Message::hello().flatten(),
            });
        }

        Self {
            model: model.to_owned(),
            max_tokens: MAX_TOKENS,
            system,
            messages: chat,
            stream: None,
        }
    }

    /// Enable streaming for the request.
    pub fn stream(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}
