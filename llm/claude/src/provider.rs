//! The `LLM` implementation for the Anthropic Messages adapter.

use crate::response::{Completion, ContentBlock, stop_reason};
use crate::stream::{BlockDelta, Event, StartBlock};
use crate::{Claude, Request};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{FinishReason, GenerationResult, LLM, Message, Result, StreamEvent, Usage};

impl LLM for Claude {
    async fn generate(&self, model: &str, messages: &[Message]) -> Result<GenerationResult> {
        let body = Request::new(model, messages);
        tracing::debug!(model, "anthropic generate request");
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
        let mut answer = String::new();
        let mut reasoning = String::new();
        for block in completion.content {
            match block {
                ContentBlock::Text { text } => answer.push_str(&text),
                ContentBlock::Thinking { thinking } => reasoning.push_str(&thinking),
                ContentBlock::Unknown => {}
            }
        }
        Ok(GenerationResult {
            text: answer,
            reasoning: (!reasoning.is_empty()).then_some(reasoning),
            finish_reason: completion
                .stop_reason
                .as_deref()
                .map(stop_reason)
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
            tracing::debug!("opening anthropic stream");
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
                    let event = match serde_json::from_str::<Event>(data) {
                        Ok(event) => event,
                        Err(err) => {
                            // Keep partial output usable: skip the
                            // malformed event instead of killing the stream.
                            tracing::warn!("skipping malformed stream event: {err}");
                            continue;
                        }
                    };
                    match event {
                        Event::MessageStart { message } => {
                            if let Some(start) = message.usage {
                                usage.prompt_tokens = start.input_tokens;
                            }
                        }
                        Event::ContentBlockStart { content_block } => match content_block {
                            StartBlock::Text { text } if !text.is_empty() => {
                                yield StreamEvent::text(text);
                            }
                            StartBlock::Thinking { thinking } if !thinking.is_empty() => {
                                yield StreamEvent::reasoning(thinking);
                            }
                            _ => {}
                        },
                        Event::ContentBlockDelta { delta } => match delta {
                            BlockDelta::TextDelta { text } if !text.is_empty() => {
                                yield StreamEvent::text(text);
                            }
                            BlockDelta::ThinkingDelta { thinking } if !thinking.is_empty() => {
                                yield StreamEvent::reasoning(thinking);
                            }
                            _ => {}
                        },
                        Event::MessageDelta { delta, usage: output } => {
                            usage.completion_tokens = output.output_tokens;
                            if let Some(reason) = delta.stop_reason.as_deref() {
                                finish = Some(stop_reason(reason));
                            }
                        }
                        Event::MessageStop => {
                            ended = true;
                            break;
                        }
                        Event::ContentBlockStop {} | Event::Ping | Event::Unknown => {}
                    }
                }
                if ended {
                    break;
                }
            }

            tracing::debug!(?finish, "anthropic stream closed");
            yield StreamEvent::done(finish.unwrap_or(FinishReason::Other), usage);
        }
    }
}
