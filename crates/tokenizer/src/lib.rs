//! Tokenizer service over byte-pair-encoding vocabularies.
//!
//! Wraps `tiktoken-rs` vocabularies behind a lazily initialized,
//! process-wide service. The first caller for a vocabulary triggers the
//! load; concurrent first callers await the same in-flight load instead of
//! racing duplicates. `shutdown` releases the loaded vocabularies exactly
//! once during graceful process shutdown.

pub use service::{Tokenizer, TokenizerService, Vocabulary, shutdown};

mod service;
