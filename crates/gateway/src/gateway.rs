//! The gateway entry point.

use crate::config::Keys;
use crate::registry::Registry;
use crate::usage::Accountant;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{GenerationRequest, GenerationResult, Message, Result, StreamEvent};
use std::sync::Arc;
use tokenizer::{Tokenizer, Vocabulary};

/// Single entry point callers use to generate or stream a completion
/// against a logical model id.
///
/// Holds the immutable registry and the tokenizer-backed accountant.
/// Cheap to clone; safe to share across concurrent request tasks.
#[derive(Clone)]
pub struct Gateway {
    registry: Arc<Registry>,
    accountant: Accountant,
}

impl Gateway {
    /// Build the gateway from the process environment.
    pub fn from_env() -> Self {
        Self::new(Registry::build(&Keys::from_env()))
    }

    /// Build the gateway over an already-built registry.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            accountant: Accountant::new(Tokenizer::global(Vocabulary::Gpt4)),
        }
    }

    /// The registry behind this gateway.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Single-shot completion.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let binding = self.registry.resolve(&request.model_id)?;
        let messages = prepare(request);
        tracing::debug!(model = %request.model_id, upstream = binding.model(), "generate");

        let mut result = binding.generate(&messages).await?;
        result.usage = self
            .accountant
            .reconcile(result.usage, &messages, &result.text)
            .await;
        Ok(result)
    }

    /// Streaming completion.
    ///
    /// Resolve failures surface as the stream's single terminal `Err`.
    /// The stream is forward-only and not restartable; a fresh call is
    /// required to retry. Dropping it closes the vendor connection.
    pub fn stream(
        &self,
        request: &GenerationRequest,
    ) -> impl Stream<Item = Result<StreamEvent>> + Send + 'static {
        let resolved = self.registry.resolve(&request.model_id).cloned();
        let messages = prepare(request);
        let accountant = self.accountant;
        let model_id = request.model_id.clone();

        try_stream! {
            let binding = resolved?;
            tracing::debug!(model = %model_id, upstream = binding.model(), "stream");

            // Every observed delta, both channels; the completion-side
            // fallback count runs over this.
            let mut completion = String::new();
            let mut stream = std::pin::pin!(binding.stream(&messages));
            while let Some(event) = stream.next().await {
                match event? {
                    StreamEvent::TextDelta { value, reasoning } => {
                        completion.push_str(&value);
                        if let Some(reasoning) = &reasoning {
                            completion.push_str(reasoning);
                        }
                        yield StreamEvent::TextDelta { value, reasoning };
                    }
                    StreamEvent::Done {
                        finish_reason,
                        usage,
                    } => {
                        let usage = accountant.reconcile(usage, &messages, &completion).await;
                        yield StreamEvent::Done {
                            finish_reason,
                            usage,
                        };
                        break;
                    }
                }
            }
        }
    }
}

/// Prepend the system prompt and normalize message content for dispatch.
///
/// A user or assistant message never reaches an adapter with an empty
/// part list.
fn prepare(request: &GenerationRequest) -> Vec<Message> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(prompt) = &request.system_prompt {
        messages.push(Message::system(prompt.clone()));
    }
    messages.extend(request.messages.iter().cloned().map(Message::normalized));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::ContentPart;

    #[test]
    fn prepare_prepends_the_system_prompt() {
        let request = GenerationRequest::new("chat-model")
            .system_prompt("be terse")
            .message(Message::user("hi"));
        let messages = prepare(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system("be terse"));
    }

    #[test]
    fn prepare_normalizes_empty_content() {
        let request = GenerationRequest::new("chat-model").message(Message {
            role: llm::Role::User,
            content: Default::default(),
        });
        let messages = prepare(&request);
        assert_eq!(messages[0].content.len(), 1);
        assert_eq!(messages[0].content[0], ContentPart::text(""));
    }
}
