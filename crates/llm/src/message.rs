//! Narwhal chat messages.

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// A single piece of message content.
///
/// Adapters translate each variant explicitly into their vendor's wire
/// shape. The union is open so non-text parts (images) can be added
/// without a wire-format break; adapters keep a default arm for variants
/// they cannot carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// The text value.
        value: String,
    },
}

impl ContentPart {
    /// Create a text part.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// The text of this part. Empty for any future non-text variant.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { value } => value,
            #[allow(unreachable_patterns)]
            _ => "",
        }
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Message {
    /// The role of the message.
    pub role: Role,

    /// Ordered content parts. Most messages carry a single text part.
    #[serde(default)]
    pub content: SmallVec<[ContentPart; 1]>,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: smallvec![ContentPart::text(content)],
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: smallvec![ContentPart::text(content)],
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: smallvec![ContentPart::text(content)],
        }
    }

    /// The default user message adapters substitute for an empty
    /// conversation.
    pub fn hello() -> Self {
        Self::user("Hello")
    }

    /// Concatenate all text parts in order, with no separator.
    pub fn flatten(&self) -> String {
        self.content.iter().map(ContentPart::as_text).collect()
    }

    /// Repair an empty content list to a single empty text part, so a
    /// message is never dispatched with no parts at all.
    pub fn normalized(mut self) -> Self {
        if self.content.is_empty() {
            self.content = smallvec![ContentPart::text("")];
        }
        self
    }
}

/// The role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The user role.
    #[default]
    User,
    /// The assistant role.
    Assistant,
    /// The system role.
    System,
}

impl Role {
    /// The wire name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_concatenates_parts_without_separator() {
        let message = Message {
            role: Role::User,
            content: smallvec![ContentPart::text("foo"), ContentPart::text("bar")],
        };
        assert_eq!(message.flatten(), "foobar");
    }

    #[test]
    fn normalized_repairs_empty_content() {
        let message = Message {
            role: Role::Assistant,
            content: SmallVec::new(),
        };
        let normalized = message.normalized();
        assert_eq!(normalized.content.len(), 1);
        assert_eq!(normalized.flatten(), "");
    }

    #[test]
    fn normalized_keeps_existing_content() {
        let message = Message::user("hi");
        assert_eq!(message.clone().normalized(), message);
    }

    #[test]
    fn hello_is_a_user_message() {
        let hello = Message::hello();
        assert_eq!(hello.role, Role::User);
        assert_eq!(hello.flatten(), "Hello");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
