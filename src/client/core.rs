use crate::cache::{CacheKey, CacheKeyGenerator, ResponseCache};
use crate::client::chat::ChatOptions;
use crate::config::ClientConfig;
use crate::stats::{StatsSnapshot, UsageStats};
use crate::transport::HttpTransport;
use crate::types::MessagePayload;
use crate::Result;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Client for the Puter AI driver API.
///
/// Each instance owns its response cache and usage counters; nothing is
/// shared between instances. Construct a fresh client to start a new
/// session with empty state.
pub struct PuterClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: HttpTransport,
    pub(crate) keys: CacheKeyGenerator,
    pub(crate) cache: Mutex<ResponseCache>,
    pub(crate) stats: UsageStats,
}

impl PuterClient {
    /// Build a client from `config`, resolving the auth token from the
    /// environment or keyring when the config has none.
    pub fn new(config: ClientConfig) -> Result<Self> {
        crate::client::builder::PuterClientBuilder::from_config(config).build()
    }

    pub fn builder() -> crate::client::builder::PuterClientBuilder {
        crate::client::builder::PuterClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a chat completion, answering from the cache when possible.
    pub async fn chat(
        &self,
        payload: impl Into<MessagePayload>,
        options: ChatOptions,
    ) -> Result<String> {
        self.execute(payload.into(), options).await
    }

    /// The cache key `chat` would use for this request.
    pub fn cache_key(&self, payload: &MessagePayload, options: &ChatOptions) -> Result<CacheKey> {
        let resolved = options.resolve(&self.config.default_model)?;
        self.keys.generate(
            &payload.to_messages(),
            &resolved.model,
            resolved.temperature,
            resolved.max_tokens,
        )
    }

    pub fn is_cached(&self, key: &CacheKey) -> bool {
        self.cache().contains(key)
    }

    pub fn stats(&self) -> StatsSnapshot {
        let size = self.cache().len();
        self.stats.snapshot(size)
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
        tracing::debug!("response cache cleared");
    }

    pub(crate) fn cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
