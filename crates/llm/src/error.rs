//! Gateway error taxonomy.

use compact_str::CompactString;

/// Errors surfaced by the gateway and its backend adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The logical model id is not in the ready registry mapping.
    ///
    /// Covers both ids that were never declared and ids whose backing
    /// vendor was unconfigured at startup; callers cannot tell the two
    /// apart.
    #[error("unknown model: {0}")]
    UnknownModel(CompactString),

    /// The tokenizer vocabulary could not be loaded, or was already
    /// released. Token accounting degrades to zero counts on this error;
    /// it never fails a generation.
    #[error("tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),

    /// Network or HTTP failure reaching a vendor.
    #[error("vendor transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The vendor responded, but in an unexpected shape.
    #[error("vendor protocol error: {0}")]
    Protocol(String),

    /// Invalid adapter construction input.
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias over the gateway [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
