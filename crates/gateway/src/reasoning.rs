//! Reasoning extraction middleware.
//!
//! Wraps any backend whose output may embed a tagged reasoning segment
//! (e.g. `<think>...</think>`) and re-routes the tag interior to the
//! auxiliary reasoning channel, passing the remaining text through
//! unmodified. The tags themselves appear on neither channel, so joining
//! both channels and re-inserting the tag pair at the original offsets
//! reconstructs the wrapped backend's raw output.

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{GenerationResult, LLM, Message, Result, StreamEvent};

/// Default tag name, matching models that emit `<think>` blocks.
pub const DEFAULT_TAG: &str = "think";

/// Middleware splitting a tagged reasoning segment out of a wrapped
/// backend's output.
#[derive(Clone)]
pub struct Reasoning<P> {
    inner: P,
    open: String,
    close: String,
}

impl<P> Reasoning<P> {
    /// Wrap a backend with the default `<think>` tag pair.
    pub fn new(inner: P) -> Self {
        Self::with_tag(inner, DEFAULT_TAG)
    }

    /// Wrap a backend with a custom tag name.
    pub fn with_tag(inner: P, tag: &str) -> Self {
        Self {
            inner,
            open: format!("<{tag}>"),
            close: format!("</{tag}>"),
        }
    }
}

impl<P> LLM for Reasoning<P>
where
    P: LLM + Send + Sync,
{
    async fn generate(&self, model: &str, messages: &[Message]) -> Result<GenerationResult> {
        let mut result = self.inner.generate(model, messages).await?;

        let mut splitter = Splitter::new(&self.open, &self.close);
        let (mut text, mut reasoning) = splitter.push(&result.text);
        let (tail_text, tail_reasoning) = splitter.finish();
        text.push_str(&tail_text);
        reasoning.push_str(&tail_reasoning);

        result.text = text;
        if !reasoning.is_empty() {
            result.reasoning = match result.reasoning.take() {
                Some(mut native) => {
                    native.push_str(&reasoning);
                    Some(native)
                }
                None => Some(reasoning),
            };
        }
        Ok(result)
    }

    fn stream(
        &self,
        model: &str,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamEvent>> + Send {
        let inner = self.inner.clone();
        let model = model.to_owned();
        let messages = messages.to_vec();
        let (open, close) = (self.open.clone(), self.close.clone());

        try_stream! {
            let mut splitter = Splitter::new(&open, &close);
            let mut stream = std::pin::pin!(inner.stream(&model, &messages));

            while let Some(item) = stream.next().await {
                match item {
                    Ok(StreamEvent::TextDelta { value, reasoning: native }) => {
                        let (text, mut reasoning) = splitter.push(&value);
                        // Native reasoning deltas pass through untouched,
                        // ahead of anything the splitter extracted.
                        if let Some(native) = native {
                            reasoning.insert_str(0, &native);
                        }
                        if !text.is_empty() || !reasoning.is_empty() {
                            yield StreamEvent::TextDelta {
                                value: text,
                                reasoning: (!reasoning.is_empty()).then_some(reasoning),
                            };
                        }
                    }
                    Ok(StreamEvent::Done { finish_reason, usage }) => {
                        let (text, reasoning) = splitter.finish();
                        if !text.is_empty() || !reasoning.is_empty() {
                            yield StreamEvent::TextDelta {
                                value: text,
                                reasoning: (!reasoning.is_empty()).then_some(reasoning),
                            };
                        }
                        yield StreamEvent::Done { finish_reason, usage };
                        break;
                    }
                    Err(err) => {
                        // Deliver what the splitter already held before the
                        // failure, then surface the terminal error.
                        let (text, reasoning) = splitter.finish();
                        if !text.is_empty() || !reasoning.is_empty() {
                            yield StreamEvent::TextDelta {
                                value: text,
                                reasoning: (!reasoning.is_empty()).then_some(reasoning),
                            };
                        }
                        Err(err)?;
                    }
                }
            }
        }
    }
}

/// Incremental tag splitter.
///
/// Feeds arbitrary text fragments and routes them to the answer or
/// reasoning channel, holding back only the longest trailing fragment
/// that could still begin the tag currently sought. The holdback is
/// bounded by the tag length, so a tag split across two deltas is
/// detected without unbounded buffering.
struct Splitter<'a> {
    open: &'a str,
    close: &'a str,
    in_tag: bool,
    held: String,
}

impl<'a> Splitter<'a> {
    fn new(open: &'a str, close: &'a str) -> Self {
        Self {
            open,
            close,
            in_tag: false,
            held: String::new(),
        }
    }

    /// Process one fragment. Returns the text routed to the answer and
    /// reasoning channels, in order.
    fn push(&mut self, fragment: &str) -> (String, String) {
        let mut buffer = std::mem::take(&mut self.held);
        buffer.push_str(fragment);

        let mut text = String::new();
        let mut reasoning = String::new();
        loop {
            let tag = if self.in_tag { self.close } else { self.open };
            match buffer.find(tag) {
                Some(position) => {
                    let routed = &buffer[..position];
                    if self.in_tag {
                        reasoning.push_str(routed);
                    } else {
                        text.push_str(routed);
                    }
                    buffer.drain(..position + tag.len());
                    self.in_tag = !self.in_tag;
                }
                None => {
                    let keep = partial_suffix(&buffer, tag);
                    let routed = &buffer[..buffer.len() - keep];
                    if self.in_tag {
                        reasoning.push_str(routed);
                    } else {
                        text.push_str(routed);
                    }
                    self.held = buffer.split_off(buffer.len() - keep);
                    break;
                }
            }
        }
        (text, reasoning)
    }

    /// Flush at end of stream. Inside an unterminated tag, the held
    /// content routes to the reasoning channel; otherwise a dangling
    /// partial tag was ordinary text all along.
    fn finish(&mut self) -> (String, String) {
        let held = std::mem::take(&mut self.held);
        if self.in_tag {
            (String::new(), held)
        } else {
            (held, String::new())
        }
    }
}

/// Length of the longest suffix of `text` that is a proper prefix of
/// `tag`.
fn partial_suffix(text: &str, tag: &str) -> usize {
    let longest = tag.len().saturating_sub(1).min(text.len());
    for length in (1..=longest).rev() {
        if !text.is_char_boundary(text.len() - length) {
            continue;
        }
        if tag.starts_with(&text[text.len() - length..]) {
            return length;
        }
    }
    0
}
