//! No-op backend for wiring tests.
//!
//! Implements [`LLM`] but panics on `generate` and `stream`. Intended for
//! unit tests that exercise registry and accounting logic without making
//! real vendor calls.

use crate::{GenerationResult, LLM, Message, Result, StreamEvent};
use futures_core::Stream;

/// A no-op backend that panics on any actual vendor call.
///
/// # Panics
///
/// Both `generate` and `stream` panic if driven. Only use this backend in
/// tests that never invoke generation.
#[derive(Clone, Copy)]
pub struct NoopProvider;

impl LLM for NoopProvider {
    async fn generate(&self, _model: &str, _messages: &[Message]) -> Result<GenerationResult> {
        panic!("NoopProvider::generate called — not intended for real backend calls");
    }

    fn stream(
        &self,
        _model: &str,
        _messages: &[Message],
    ) -> impl Stream<Item = Result<StreamEvent>> + Send {
        async_stream::stream! {
            panic!("NoopProvider::stream called — not intended for real backend calls");
            #[allow(unreachable_code)]
            {
                yield Ok(StreamEvent::text(""));
            }
        }
    }
}
