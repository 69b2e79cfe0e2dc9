//! Environment-driven gateway configuration.

use crate::catalog::Vendor;
use serde::{Deserialize, Serialize};

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the Grok (xAI) API key.
pub const XAI_API_KEY: &str = "XAI_API_KEY";
/// Environment variable holding the Anthropic API key.
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// Vendor credentials.
///
/// Presence of a key decides that vendor's availability once at startup;
/// keys are never re-read per request. A missing non-primary key never
/// prevents the remaining vendors from registering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keys {
    /// OpenAI API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,

    /// Grok (xAI) API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xai: Option<String>,

    /// Anthropic API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
}

impl Keys {
    /// Read vendor keys from the process environment. Empty values count
    /// as absent.
    pub fn from_env() -> Self {
        Self {
            openai: read(OPENAI_API_KEY),
            xai: read(XAI_API_KEY),
            anthropic: read(ANTHROPIC_API_KEY),
        }
    }

    /// The key for a vendor, if configured.
    pub fn key(&self, vendor: Vendor) -> Option<&str> {
        match vendor {
            Vendor::OpenAI => self.openai.as_deref(),
            Vendor::Grok => self.xai.as_deref(),
            Vendor::Anthropic => self.anthropic.as_deref(),
        }
    }
}

fn read(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lookup_follows_the_vendor() {
        let keys = Keys {
            openai: Some("sk-openai".into()),
            xai: None,
            anthropic: Some("sk-ant".into()),
        };
        assert_eq!(keys.key(Vendor::OpenAI), Some("sk-openai"));
        assert_eq!(keys.key(Vendor::Grok), None);
        assert_eq!(keys.key(Vendor::Anthropic), Some("sk-ant"));
    }
}
