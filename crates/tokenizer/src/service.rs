//! Lazily initialized tokenizer vocabularies.

use llm::{Error, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, RwLock};
use tiktoken_rs::CoreBPE;

/// A fixed vocabulary, identified by the model family it encodes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// The GPT-4 family encoding (`cl100k_base`).
    Gpt4,
}

/// Number of [`Vocabulary`] variants; sizes the per-vocabulary slot table.
const VOCABULARY_COUNT: usize = 1;

impl Vocabulary {
    const fn index(self) -> usize {
        match self {
            Self::Gpt4 => 0,
        }
    }

    /// Load the vocabulary. Blocking; run on a blocking thread.
    fn load(self) -> Result<CoreBPE> {
        match self {
            Self::Gpt4 => tiktoken_rs::cl100k_base()
                .map_err(|err| Error::TokenizerUnavailable(err.to_string())),
        }
    }
}

/// Per-vocabulary singleton state.
#[derive(Default)]
struct Slot {
    /// Serializes concurrent first-use loads.
    init: tokio::sync::Mutex<()>,
    /// The loaded vocabulary. `None` before first use and after release.
    handle: RwLock<Option<Arc<CoreBPE>>>,
    /// How many underlying loads actually ran.
    loads: AtomicU64,
    /// Set once by `shutdown`; later lookups fail instead of reloading.
    released: AtomicBool,
}

/// Holds one slot per vocabulary. Each slot is loaded at most once per
/// service and dropped exactly once on shutdown.
pub struct TokenizerService {
    slots: [Slot; VOCABULARY_COUNT],
}

static GLOBAL: LazyLock<TokenizerService> = LazyLock::new(TokenizerService::new);

impl TokenizerService {
    /// Create a standalone service with its own slots. Tests use this to
    /// observe load counts without touching the process-wide service.
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// The process-wide service.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// A handle bound to one vocabulary of this service.
    pub fn tokenizer(&'static self, vocabulary: Vocabulary) -> Tokenizer {
        Tokenizer {
            service: self,
            vocabulary,
        }
    }

    /// How many underlying loads ran for a vocabulary.
    pub fn loads(&self, vocabulary: Vocabulary) -> u64 {
        self.slots[vocabulary.index()].loads.load(Ordering::Relaxed)
    }

    /// Release all loaded vocabularies. The first call frees the handles;
    /// repeated calls are a no-op. Lookups after release fail with
    /// `TokenizerUnavailable` rather than reloading.
    pub fn shutdown(&self) {
        for slot in &self.slots {
            if !slot.released.swap(true, Ordering::AcqRel) {
                slot.handle.write().expect("tokenizer lock poisoned").take();
            }
        }
        tracing::debug!("tokenizer vocabularies released");
    }

    /// Encode text into token ids.
    pub async fn encode(&self, vocabulary: Vocabulary, text: &str) -> Result<Vec<usize>> {
        let handle = self.handle(vocabulary).await?;
        Ok(handle.encode_with_special_tokens(text))
    }

    /// Decode token ids back into text.
    pub async fn decode(&self, vocabulary: Vocabulary, tokens: Vec<usize>) -> Result<String> {
        let handle = self.handle(vocabulary).await?;
        handle
            .decode(tokens)
            .map_err(|err| Error::TokenizerUnavailable(err.to_string()))
    }

    /// Count the tokens in a text. Empty text counts zero without touching
    /// the vocabulary.
    pub async fn count_tokens(&self, vocabulary: Vocabulary, text: &str) -> Result<usize> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok(self.encode(vocabulary, text).await?.len())
    }

    async fn handle(&self, vocabulary: Vocabulary) -> Result<Arc<CoreBPE>> {
        let slot = &self.slots[vocabulary.index()];
        if slot.released.load(Ordering::Acquire) {
            return Err(Error::TokenizerUnavailable(
                "tokenizer already released".into(),
            ));
        }
        if let Some(handle) = slot
            .handle
            .read()
            .expect("tokenizer lock poisoned")
            .as_ref()
        {
            return Ok(handle.clone());
        }

        let _guard = slot.init.lock().await;
        // A concurrent caller may have finished the load while this one
        // waited on the init lock.
        if let Some(handle) = slot
            .handle
            .read()
            .expect("tokenizer lock poisoned")
            .as_ref()
        {
            return Ok(handle.clone());
        }

        tracing::debug!(?vocabulary, "loading tokenizer vocabulary");
        let loaded = tokio::task::spawn_blocking(move || vocabulary.load())
            .await
            .map_err(|err| Error::TokenizerUnavailable(err.to_string()))??;
        let loaded = Arc::new(loaded);
        slot.loads.fetch_add(1, Ordering::Relaxed);
        *slot.handle.write().expect("tokenizer lock poisoned") = Some(loaded.clone());
        Ok(loaded)
    }
}

impl Default for TokenizerService {
    fn default() -> Self {
        Self::new()
    }
}

/// A cheap handle binding a service to one vocabulary.
#[derive(Clone, Copy)]
pub struct Tokenizer {
    service: &'static TokenizerService,
    vocabulary: Vocabulary,
}

impl Tokenizer {
    /// A handle over the process-wide service.
    pub fn global(vocabulary: Vocabulary) -> Self {
        TokenizerService::global().tokenizer(vocabulary)
    }

    /// Encode text into token ids.
    pub async fn encode(&self, text: &str) -> Result<Vec<usize>> {
        self.service.encode(self.vocabulary, text).await
    }

    /// Decode token ids back into text.
    pub async fn decode(&self, tokens: Vec<usize>) -> Result<String> {
        self.service.decode(self.vocabulary, tokens).await
    }

    /// Count the tokens in a text.
    pub async fn count_tokens(&self, text: &str) -> Result<usize> {
        self.service.count_tokens(self.vocabulary, text).await
    }
}

/// Release the process-wide service's vocabularies. Called once during
/// graceful shutdown; repeated calls are a no-op.
pub fn shutdown() {
    TokenizerService::global().shutdown();
}
