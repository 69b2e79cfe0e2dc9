//! Static model catalog.
//!
//! Logical model ids offered to callers, with display metadata and the
//! vendor binding behind each id. Which entries actually register is
//! decided per vendor at registry build time; the catalog itself only
//! declares what could exist.

use serde::Serialize;

/// The logical model id used when a caller does not choose one.
pub const DEFAULT_CHAT_MODEL: &str = "chat-model";

/// Display metadata for one logical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatModel {
    /// The logical model id.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Short description shown to callers picking a model.
    pub description: &'static str,
}

/// Which vendor backs a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    /// OpenAI chat completions API.
    OpenAI,
    /// Grok (xAI) API, OpenAI-compatible.
    Grok,
    /// Anthropic Messages API.
    Anthropic,
}

/// One declared logical model.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Display metadata.
    pub model: ChatModel,
    /// The vendor backing this id.
    pub vendor: Vendor,
    /// The vendor-side model name.
    pub upstream: &'static str,
    /// Whether the reasoning middleware wraps this binding.
    pub reasoning: bool,
}

/// Every logical model the gateway can offer.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        model: ChatModel {
            id: "chat-model",
            name: "GPT-4 (OpenAI)",
            description: "Primary model - may have content restrictions",
        },
        vendor: Vendor::OpenAI,
        upstream: "gpt-4",
        reasoning: false,
    },
    CatalogEntry {
        model: ChatModel {
            id: "chat-model-reasoning",
            name: "GPT-4 Reasoning",
            description: "Advanced reasoning - may have content restrictions",
        },
        vendor: Vendor::OpenAI,
        upstream: "gpt-4",
        reasoning: true,
    },
    CatalogEntry {
        model: ChatModel {
            id: "grok-beta",
            name: "Grok Beta (xAI)",
            description: "More permissive for security research",
        },
        vendor: Vendor::Grok,
        upstream: "grok-beta",
        reasoning: false,
    },
    CatalogEntry {
        model: ChatModel {
            id: "grok-2-1212",
            name: "Grok-2 (xAI)",
            description: "Latest Grok model - Good for security research",
        },
        vendor: Vendor::Grok,
        upstream: "grok-2-1212",
        reasoning: false,
    },
    CatalogEntry {
        model: ChatModel {
            id: "claude-3-5-sonnet",
            name: "Claude 3.5 Sonnet (Anthropic)",
            description: "Excellent for technical security discussions",
        },
        vendor: Vendor::Anthropic,
        upstream: "claude-3-5-sonnet-20241022",
        reasoning: false,
    },
    CatalogEntry {
        model: ChatModel {
            id: "claude-3-opus",
            name: "Claude 3 Opus (Anthropic)",
            description: "Most capable Claude - Good for complex security analysis",
        },
        vendor: Vendor::Anthropic,
        upstream: "claude-3-opus-20240229",
        reasoning: false,
    },
    CatalogEntry {
        model: ChatModel {
            id: "claude-3-sonnet",
            name: "Claude 3 Sonnet (Anthropic)",
            description: "Balanced performance for security research",
        },
        vendor: Vendor::Anthropic,
        upstream: "claude-3-sonnet-20240229",
        reasoning: false,
    },
    CatalogEntry {
        model: ChatModel {
            id: "claude-3-haiku",
            name: "Claude 3 Haiku (Anthropic)",
            description: "Fast and affordable",
        },
        vendor: Vendor::Anthropic,
        upstream: "claude-3-haiku-20240307",
        reasoning: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<_> = CATALOG.iter().map(|entry| entry.model.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn default_model_is_declared() {
        assert!(
            CATALOG
                .iter()
                .any(|entry| entry.model.id == DEFAULT_CHAT_MODEL)
        );
    }
}
