use crate::cache::{CacheKeyGenerator, ResponseCache};
use crate::client::core::PuterClient;
use crate::config::ClientConfig;
use crate::stats::UsageStats;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Mutex;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
pub struct PuterClientBuilder {
    config: ClientConfig,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl PuterClientBuilder {
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            base_url_override: None,
        }
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(token.into());
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Maximum number of cached responses.
    pub fn max_cache_size(mut self, n: usize) -> Self {
        self.config.max_cache_size = n;
        self
    }

    pub fn request_batch_size(mut self, n: usize) -> Self {
        self.config.request_batch_size = n;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Override the API base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<PuterClient> {
        let mut config = self.config;
        if let Some(base) = self.base_url_override {
            config.api_base = base;
        }
        config.validate()?;
        config.auth_token = HttpTransport::resolve_auth_token(config.auth_token.take());

        let transport = HttpTransport::new(
            &config.api_base,
            config.auth_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        tracing::debug!(
            api_base = config.api_base.as_str(),
            default_model = config.default_model.as_str(),
            max_cache_size = config.max_cache_size,
            authenticated = transport.has_auth_token(),
            "puter client built"
        );

        Ok(PuterClient {
            cache: Mutex::new(ResponseCache::new(config.max_cache_size)),
            stats: UsageStats::new(),
            keys: CacheKeyGenerator::new(),
            transport,
            config,
        })
    }
}

impl Default for PuterClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
