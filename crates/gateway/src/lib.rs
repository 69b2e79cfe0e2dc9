//! Narwhal model registry and provider gateway.
//!
//! Maps logical model ids to vendor backends, with optional reasoning
//! extraction and best-effort token accounting. The [`Gateway`] is the
//! single entry point callers use to `generate` or `stream` a completion
//! against a logical model id; the [`Registry`] behind it is built once at
//! startup from the static catalog plus environment-driven vendor
//! availability, and is immutable afterwards.

pub use catalog::{CATALOG, CatalogEntry, ChatModel, DEFAULT_CHAT_MODEL, Vendor};
pub use config::Keys;
pub use gateway::Gateway;
pub use provider::Provider;
pub use reasoning::Reasoning;
pub use registry::{Binding, Registry};
pub use usage::Accountant;

pub mod catalog;
pub mod config;
mod gateway;
mod provider;
mod reasoning;
mod registry;
mod usage;
