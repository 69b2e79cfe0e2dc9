//! The backend adapter trait.

use crate::{GenerationResult, Message, Result, StreamEvent};
use futures_core::Stream;

/// A chat completion backend, implemented once per vendor wire protocol.
///
/// `model` is the vendor-side model name; logical-id resolution happens in
/// the registry above this trait. Whether a backend is available at all is
/// decided once at startup from configuration, before the adapter is
/// constructed; an instance of this trait is always usable.
pub trait LLM: Sized + Clone {
    /// Perform a single blocking round trip.
    fn generate(
        &self,
        model: &str,
        messages: &[Message],
    ) -> impl Future<Output = Result<GenerationResult>> + Send;

    /// Open a vendor streaming call and relay incremental events.
    ///
    /// The returned stream yields zero or more `TextDelta` items and then
    /// exactly one terminal item. Dropping the stream closes the vendor
    /// connection; no reads continue past the drop.
    fn stream(
        &self,
        model: &str,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamEvent>> + Send;
}
