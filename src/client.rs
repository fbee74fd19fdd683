//! Puter client: chat primitive, cache, and statistics.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod chat;
pub mod core;
mod execution;

pub use builder::PuterClientBuilder;
pub use chat::{ChatOptions, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use core::PuterClient;
