//! Model registry: logical id to provider binding, frozen at startup.

use crate::catalog::{CATALOG, ChatModel, Vendor};
use crate::config::Keys;
use crate::provider::Provider;
use crate::reasoning::Reasoning;
use async_stream::try_stream;
use claude::Claude;
use compact_str::CompactString;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Client, Error, GenerationResult, LLM, Message, Result, StreamEvent};
use openai::OpenAI;
use std::collections::BTreeMap;

/// A resolved binding of a logical model id: the concrete backend, the
/// vendor-side model name, and whether the reasoning middleware wraps it.
#[derive(Debug, Clone)]
pub struct Binding {
    provider: Provider,
    model: CompactString,
    reasoning: bool,
}

impl Binding {
    /// Create a binding. The registry builds these from the catalog; tests
    /// build them around stub backends.
    pub fn new(provider: Provider, model: impl Into<CompactString>, reasoning: bool) -> Self {
        Self {
            provider,
            model: model.into(),
            reasoning,
        }
    }

    /// The vendor-side model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the reasoning middleware wraps this binding.
    pub fn wraps_reasoning(&self) -> bool {
        self.reasoning
    }

    /// Single round trip through the backend, reasoning-wrapped when the
    /// catalog flags it.
    pub async fn generate(&self, messages: &[Message]) -> Result<GenerationResult> {
        if self.reasoning {
            Reasoning::new(self.provider.clone())
                .generate(&self.model, messages)
                .await
        } else {
            self.provider.generate(&self.model, messages).await
        }
    }

    /// Streaming call through the backend, reasoning-wrapped when the
    /// catalog flags it.
    pub fn stream(&self, messages: &[Message]) -> impl Stream<Item = Result<StreamEvent>> + Send {
        let binding = self.clone();
        let messages = messages.to_vec();
        try_stream! {
            if binding.reasoning {
                let middleware = Reasoning::new(binding.provider);
                let mut stream = std::pin::pin!(middleware.stream(&binding.model, &messages));
                while let Some(event) = stream.next().await {
                    yield event?;
                }
            } else {
                let mut stream = std::pin::pin!(binding.provider.stream(&binding.model, &messages));
                while let Some(event) = stream.next().await {
                    yield event?;
                }
            }
        }
    }
}

/// Immutable mapping from logical model ids to bindings.
///
/// Built exactly once at startup: the build pass walks the static catalog,
/// binds every entry whose vendor has a key, and freezes the result. After
/// that the mapping is shared read-only across concurrent requests; no
/// entry is ever mutated mid-request.
pub struct Registry {
    entries: BTreeMap<CompactString, Binding>,
    catalog: Vec<ChatModel>,
}

impl Registry {
    /// Build the registry from the static catalog and vendor keys.
    ///
    /// Entries whose vendor has no key are skipped, never errored; an
    /// adapter that fails to construct is likewise skipped with a warning,
    /// so one misconfigured vendor cannot take the rest of the gateway
    /// down.
    pub fn build(keys: &Keys) -> Self {
        let client = Client::new();
        let mut entries = BTreeMap::new();
        let mut catalog = Vec::new();

        for entry in CATALOG {
            let Some(key) = keys.key(entry.vendor) else {
                tracing::info!(
                    model = entry.model.id,
                    vendor = ?entry.vendor,
                    "vendor key absent, skipping"
                );
                continue;
            };
            let provider = match build_vendor(entry.vendor, &client, key) {
                Ok(provider) => provider,
                Err(err) => {
                    tracing::warn!(
                        model = entry.model.id,
                        "adapter construction failed, skipping: {err}"
                    );
                    continue;
                }
            };
            entries.insert(
                CompactString::from(entry.model.id),
                Binding::new(provider, entry.upstream, entry.reasoning),
            );
            catalog.push(entry.model);
        }

        tracing::info!(models = entries.len(), "model registry ready");
        Self { entries, catalog }
    }

    /// Build a registry over explicit bindings. Tests use this to drive
    /// the gateway with stub backends.
    pub fn with_bindings(
        bindings: impl IntoIterator<Item = (CompactString, Binding)>,
    ) -> Self {
        Self {
            entries: bindings.into_iter().collect(),
            catalog: Vec::new(),
        }
    }

    /// Resolve a logical model id to its binding.
    ///
    /// Fails with `UnknownModel` for ids that were never declared and for
    /// ids whose vendor was unavailable at startup; callers cannot tell
    /// the two apart.
    pub fn resolve(&self, model_id: &str) -> Result<&Binding> {
        self.entries
            .get(model_id)
            .ok_or_else(|| Error::UnknownModel(model_id.into()))
    }

    /// The logical model ids technically available to callers.
    ///
    /// Policy layers intersect this with a user's permitted set; the
    /// gateway itself never enforces entitlement.
    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(CompactString::as_str)
    }

    /// Display metadata for every available model.
    pub fn models(&self) -> &[ChatModel] {
        &self.catalog
    }
}

fn build_vendor(vendor: Vendor, client: &Client, key: &str) -> Result<Provider> {
    match vendor {
        Vendor::OpenAI => Ok(Provider::OpenAI(OpenAI::api(client.clone(), key)?)),
        Vendor::Grok => Ok(Provider::OpenAI(OpenAI::grok(client.clone(), key)?)),
        Vendor::Anthropic => Ok(Provider::Claude(Claude::anthropic(client.clone(), key)?)),
    }
}
