//! Best-effort token accounting.

use llm::{Message, Usage};
use tokenizer::Tokenizer;

/// Attaches prompt and completion token counts to results.
///
/// Vendor-reported counts take precedence; recomputation through the
/// tokenizer service fills only the sides the vendor did not report.
/// Tokenizer failure degrades to zero counts. Accounting is telemetry,
/// never a request-failing path.
#[derive(Clone, Copy)]
pub struct Accountant {
    tokenizer: Tokenizer,
}

impl Accountant {
    /// Create an accountant over a tokenizer handle.
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Reconcile vendor-reported usage with recomputed fallbacks.
    ///
    /// `completion` is the final text of a generate call, or the
    /// concatenation of every delta observed on a stream.
    pub async fn reconcile(&self, vendor: Usage, messages: &[Message], completion: &str) -> Usage {
        let prompt_tokens = if vendor.prompt_tokens > 0 {
            vendor.prompt_tokens
        } else {
            self.count(&prompt_text(messages)).await
        };
        let completion_tokens = if vendor.completion_tokens > 0 {
            vendor.completion_tokens
        } else {
            self.count(completion).await
        };
        Usage {
            prompt_tokens,
            completion_tokens,
        }
    }

    async fn count(&self, text: &str) -> u32 {
        match self.tokenizer.count_tokens(text).await {
            Ok(count) => count as u32,
            Err(err) => {
                tracing::warn!("token accounting degraded to zero: {err}");
                0
            }
        }
    }
}

/// Role-qualified concatenation of all message contents.
fn prompt_text(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(message.role.as_str());
        out.push_str(": ");
        out.push_str(&message.flatten());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_text_is_role_qualified() {
        let messages = [Message::system("be terse"), Message::user("hi")];
        assert_eq!(prompt_text(&messages), "system: be terse\nuser: hi\n");
    }
}
