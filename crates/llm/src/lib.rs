//! Unified LLM gateway types and traits.
//!
//! This crate provides the shared types used across all backend adapters:
//! `Message`, `GenerationRequest`, `GenerationResult`, `StreamEvent`, the
//! `Error` taxonomy, and the `LLM` trait. Also provides `HttpProvider` for
//! vendor HTTP transport, plus the `NoopProvider` and `StubProvider` test
//! backends.

pub use error::{Error, Result};
pub use http::HttpProvider;
pub use message::{ContentPart, Message, Role};
pub use noop::NoopProvider;
pub use provider::LLM;
pub use request::GenerationRequest;
pub use response::{FinishReason, GenerationResult, Usage};
pub use reqwest::{self, Client};
pub use stream::StreamEvent;
pub use stub::StubProvider;

mod error;
mod http;
mod message;
mod noop;
mod provider;
mod request;
mod response;
mod stream;
mod stub;
