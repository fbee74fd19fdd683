//! Client configuration: defaults, YAML files and environment overrides.

use crate::error::ErrorContext;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.puter.com";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_MAX_CACHE_SIZE: usize = crate::cache::DEFAULT_CAPACITY;
pub const DEFAULT_REQUEST_BATCH_SIZE: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_BASE: &str = "PUTER_API_BASE";
pub const ENV_AUTH_TOKEN: &str = "PUTER_AUTH_TOKEN";
pub const ENV_DEFAULT_MODEL: &str = "PUTER_DEFAULT_MODEL";
pub const ENV_MAX_CACHE_SIZE: &str = "PUTER_MAX_CACHE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "PUTER_HTTP_TIMEOUT_SECS";

/// Constructor-level settings for [`crate::PuterClient`].
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// default_model: openai/gpt-4o
/// max_cache_size: 500
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    /// Bearer token. When unset the client falls back to `PUTER_AUTH_TOKEN`
    /// and then the OS keyring.
    pub auth_token: Option<String>,
    pub default_model: String,
    pub max_cache_size: usize,
    /// Declared for callers that group work; the client does not enforce it.
    pub request_batch_size: usize,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            auth_token: None,
            default_model: DEFAULT_MODEL.to_string(),
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            request_batch_size: DEFAULT_REQUEST_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("default_model", &self.default_model)
            .field("max_cache_size", &self.max_cache_size)
            .field("request_batch_size", &self.request_batch_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ClientConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Overlay `PUTER_*` environment variables onto this config.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Same as [`apply_env`](Self::apply_env) with an injectable lookup.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(base) = get(ENV_API_BASE) {
            self.api_base = base;
        }
        if self.auth_token.is_none() {
            self.auth_token = get(ENV_AUTH_TOKEN);
        }
        if let Some(model) = get(ENV_DEFAULT_MODEL) {
            self.default_model = model;
        }
        if let Some(raw) = get(ENV_MAX_CACHE_SIZE) {
            self.max_cache_size = parse_env(ENV_MAX_CACHE_SIZE, &raw)?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_env(ENV_TIMEOUT_SECS, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_base).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid api_base '{}'", self.api_base),
                ErrorContext::new()
                    .with_field_path("api_base")
                    .with_details(e.to_string())
                    .with_source("config_loader"),
            )
        })?;
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "timeout_secs must be greater than zero",
                ErrorContext::new()
                    .with_field_path("timeout_secs")
                    .with_source("config_loader"),
            ));
        }
        if self.default_model.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "default_model must not be empty",
                ErrorContext::new()
                    .with_field_path("default_model")
                    .with_source("config_loader"),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        Error::configuration_with_context(
            format!("invalid value for {}", name),
            ErrorContext::new()
                .with_field_path(name)
                .with_details(format!("'{}': {}", raw, e))
                .with_source("env"),
        )
    })
}
