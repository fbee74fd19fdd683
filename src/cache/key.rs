//! Cache key generation.

use crate::types::Message;
use crate::Result;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Opaque, deterministic identity of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub encoded: String,
}

impl CacheKey {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encoded)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Derives cache keys from the request identity tuple
/// `(messages, model, temperature, max_tokens)`.
///
/// The tuple is serialized as a JSON array and base64 encoded. Field order is
/// fixed by the tuple, so the key does not depend on how the caller assembled
/// its options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheKeyGenerator;

impl CacheKeyGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<CacheKey> {
        let canonical = serde_json::to_string(&(messages, model, temperature, max_tokens))?;
        Ok(CacheKey::new(
            base64::engine::general_purpose::STANDARD.encode(canonical.as_bytes()),
        ))
    }
}
