//! Unified backend enum dispatch.

use async_stream::try_stream;
use claude::Claude;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{GenerationResult, LLM, Message, Result, StreamEvent, StubProvider};
use openai::OpenAI;

/// Unified backend enum.
///
/// The registry constructs the appropriate variant per catalog entry;
/// requests are monomorphized on `Provider`.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI-compatible API (covers OpenAI and Grok).
    OpenAI(OpenAI),
    /// Anthropic Messages API.
    Claude(Claude),
    /// Scripted in-process backend, used by tests.
    Stub(StubProvider),
}

impl LLM for Provider {
    async fn generate(&self, model: &str, messages: &[Message]) -> Result<GenerationResult> {
        match self {
            Self::OpenAI(provider) => provider.generate(model, messages).await,
            Self::Claude(provider) => provider.generate(model, messages).await,
            Self::Stub(provider) => provider.generate(model, messages).await,
        }
    }

    fn stream(
        &self,
        model: &str,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamEvent>> + Send {
        let this = self.clone();
        let model = model.to_owned();
        let messages = messages.to_vec();
        try_stream! {
            match this {
                Provider::OpenAI(provider) => {
                    let mut stream = std::pin::pin!(provider.stream(&model, &messages));
                    while let Some(event) = stream.next().await {
                        yield event?;
                    }
                }
                Provider::Claude(provider) => {
                    let mut stream = std::pin::pin!(provider.stream(&model, &messages));
                    while let Some(event) = stream.next().await {
                        yield event?;
                    }
                }
                Provider::Stub(provider) => {
                    let mut stream = std::pin::pin!(provider.stream(&model, &messages));
                    while let Some(event) = stream.next().await {
                        yield event?;
                    }
                }
            }
        }
    }
}
