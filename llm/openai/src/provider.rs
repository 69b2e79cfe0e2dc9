//! The `LLM` implementation for the OpenAI-compatible adapter.

use crate::response::{Chunk, Completion};
use crate::{OpenAI, Request, response};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Error, FinishReason, GenerationResult, LLM, Message, Result, StreamEvent, Usage};

impl LLM for OpenAI {
    async fn generate(&self, model: &str, messages: &[Message]) -> Result<GenerationResult> {
        let body = Request::new(model, messages);
        tracing::debug!(model, "openai-compatible generate request");
        let text = self
            .http
            .post()
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        tracing::trace!("response: {text}");

        let completion: Completion = serde_json::from_str(&text)?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Protocol("completion with no choices".into()))?;
        Ok(GenerationResult {
            text: choice.message.content.unwrap_or_default(),
            reasoning: choice
                .message
                .reasoning_content
                .filter(|reasoning| !reasoning.is_empty()),
            finish_reason: choice
                .finish_reason
                .as_deref()
                .map(response::finish_reason)
                .unwrap_or(FinishReason::Other),
            usage: completion.usage.map(Into::into).unwrap_or_default(),
        })
    }

    fn stream(
        &self,
        model: &str,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamEvent>> + Send {
        let body = Request::new(model, messages).stream();
        let request = self.http.post().json(&body);

        try_stream! {
            tracing::debug!("opening openai-compatible stream");
            let response = request.send().await?.error_for_status()?;
            let mut bytes = response.bytes_stream();

            let mut finish: Option<FinishReason> = None;
            let mut usage = Usage::default();
            // Carries a partial SSE line across network chunk boundaries.
            let mut pending = String::new();
            let mut ended = false;

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk?;
                pending.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = pending.find('\n') {
                    let line: String = pending.drain(..=newline).collect();
                    let Some(data) = line.trim().strip_prefix("data:") else {
                        continue;
                    };
                    let data = data.trim();
                    if data.is_empty() {
                        continue;
                    }
                    if data == "[DONE]" {
                        ended = true;
                        break;
                    }
                    match serde_json::from_str::<Chunk>(data) {
                        Ok(chunk) => {
                            if let Some(reported) = chunk.usage {
                                usage = reported.into();
                            }
                            if let Some(reason) = chunk.finish() {
                                finish = Some(reason);
                            }
                            let value = chunk.content().map(str::to_owned);
                            let reasoning = chunk.reasoning().map(str::to_owned);
                            if value.is_some() || reasoning.is_some() {
                                yield StreamEvent::TextDelta {
                                    value: value.unwrap_or_default(),
                                    reasoning,
                                };
                            }
                        }
                        // Keep partial output usable: skip the malformed
                        // chunk instead of killing the stream.
                        Err(err) => tracing::warn!("skipping malformed stream chunk: {err}"),
                    }
                }
                if ended {
                    break;
                }
            }

            tracing::debug!(?finish, "openai-compatible stream closed");
            yield StreamEvent::done(finish.unwrap_or(FinishReason::Other), usage);
        }
    }
}
