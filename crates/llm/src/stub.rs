//! Scripted backend for tests.
//!
//! Replays a fixed event script and records lifecycle observations: the
//! messages each call received, and whether the stream side was dropped.
//! The `closed` flag stands in for a vendor connection close, so tests can
//! observe that abandoning a stream releases the upstream connection.

use crate::{Error, FinishReason, GenerationResult, LLM, Message, Result, StreamEvent, Usage};
use futures_core::Stream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted step. Failure steps carry a message rather than an
/// [`Error`] so the script stays cloneable.
#[derive(Debug, Clone)]
enum Step {
    Event(StreamEvent),
    Fail(String),
}

#[derive(Debug, Default)]
struct Inner {
    script: Vec<Step>,
    closed: AtomicBool,
    calls: Mutex<Vec<Vec<Message>>>,
}

/// A backend that replays a fixed script instead of calling a vendor.
#[derive(Debug, Clone, Default)]
pub struct StubProvider {
    inner: Arc<Inner>,
}

impl StubProvider {
    /// A stub that streams the given deltas, then finishes with `Done`.
    pub fn streaming(deltas: &[&str], finish_reason: FinishReason, usage: Usage) -> Self {
        let mut script: Vec<Step> = deltas
            .iter()
            .map(|delta| Step::Event(StreamEvent::text(*delta)))
            .collect();
        script.push(Step::Event(StreamEvent::done(finish_reason, usage)));
        Self {
            inner: Arc::new(Inner {
                script,
                ..Inner::default()
            }),
        }
    }

    /// A stub that fails after streaming the given deltas.
    pub fn failing_after(deltas: &[&str], error: &str) -> Self {
        let mut script: Vec<Step> = deltas
            .iter()
            .map(|delta| Step::Event(StreamEvent::text(*delta)))
            .collect();
        script.push(Step::Fail(error.to_owned()));
        Self {
            inner: Arc::new(Inner {
                script,
                ..Inner::default()
            }),
        }
    }

    /// Whether the stub's vendor connection was closed, either by stream
    /// completion or by the consumer dropping the stream.
    pub fn closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Number of generate/stream calls observed.
    pub fn calls(&self) -> usize {
        self.inner.calls.lock().expect("stub lock poisoned").len()
    }

    /// The messages passed to the most recent call.
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.inner
            .calls
            .lock()
            .expect("stub lock poisoned")
            .last()
            .cloned()
    }

    fn record(&self, messages: &[Message]) {
        self.inner
            .calls
            .lock()
            .expect("stub lock poisoned")
            .push(messages.to_vec());
    }
}

/// Flips the `closed` flag when the stream side is dropped, whether the
/// script ran to completion or the consumer abandoned it.
struct CloseGuard(Arc<Inner>);

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.0.closed.store(true, Ordering::Release);
    }
}

impl LLM for StubProvider {
    async fn generate(&self, _model: &str, messages: &[Message]) -> Result<GenerationResult> {
        self.record(messages);
        let mut text = String::new();
        let mut reasoning = String::new();
        let mut finish_reason = FinishReason::Other;
        let mut usage = Usage::default();
        for step in &self.inner.script {
            match step {
                Step::Event(StreamEvent::TextDelta {
                    value,
                    reasoning: aux,
                }) => {
                    text.push_str(value);
                    if let Some(aux) = aux {
                        reasoning.push_str(aux);
                    }
                }
                Step::Event(StreamEvent::Done {
                    finish_reason: reason,
                    usage: reported,
                }) => {
                    finish_reason = *reason;
                    usage = *reported;
                }
                Step::Fail(message) => return Err(Error::Protocol(message.clone())),
            }
        }
        Ok(GenerationResult {
            text,
            reasoning: (!reasoning.is_empty()).then_some(reasoning),
            finish_reason,
            usage,
        })
    }

    fn stream(
        &self,
        _model: &str,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamEvent>> + Send {
        self.record(messages);
        let inner = self.inner.clone();
        async_stream::stream! {
            let _guard = CloseGuard(inner.clone());
            for step in &inner.script {
                match step {
                    Step::Event(event) => yield Ok(event.clone()),
                    Step::Fail(message) => {
                        yield Err(Error::Protocol(message.clone()));
                        return;
                    }
                }
            }
        }
    }
}
