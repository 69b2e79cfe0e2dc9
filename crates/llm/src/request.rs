//! A request addressed to a logical model id.

use crate::Message;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A generation request from a caller.
///
/// The `model_id` is a logical id resolved through the model registry;
/// it is not a vendor-side model name. The caller is trusted to have
/// already authorized the id against its own policy layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationRequest {
    /// The logical model id.
    pub model_id: CompactString,

    /// The conversation so far.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Optional system prompt, prepended as a system message before
    /// dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl GenerationRequest {
    /// Create a request for the given logical model id.
    pub fn new(model_id: impl Into<CompactString>) -> Self {
        Self {
            model_id: model_id.into(),
            messages: Vec::new(),
            system_prompt: None,
        }
    }

    /// Append a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}
