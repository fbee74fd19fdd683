//! # Response Caching Module
//!
//! Memoizes chat responses inside a single client so that repeated identical
//! requests do not hit the network again.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheKey`] | Opaque identity of a request |
//! | [`CacheKeyGenerator`] | Derives keys from messages, model, temperature and max tokens |
//! | [`ResponseCache`] | Bounded store with insertion-order (FIFO) eviction |
//!
//! ## Example
//!
//! ```rust
//! use puter_ai::cache::{CacheKeyGenerator, ResponseCache};
//! use puter_ai::types::Message;
//!
//! # fn main() -> puter_ai::Result<()> {
//! let key = CacheKeyGenerator::new().generate(&[Message::user("hi")], "openai/gpt-4o-mini", 0.7, 1000)?;
//! let mut cache = ResponseCache::new(2);
//! cache.set(key.clone(), "hello!".to_string());
//! assert_eq!(cache.get(&key).map(String::as_str), Some("hello!"));
//! # Ok(())
//! # }
//! ```
//!
//! Eviction is not LRU: a cache hit does not move an entry to the back.

mod key;
mod store;

pub use key::{CacheKey, CacheKeyGenerator};
pub use store::{ResponseCache, DEFAULT_CAPACITY};
