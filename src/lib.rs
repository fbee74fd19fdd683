//! # puter-ai-client
//!
//! Cost-aware client for the Puter AI driver API.
//!
//! ## Overview
//!
//! Every request goes through a single chat primitive that memoizes
//! responses in a bounded in-process cache and keeps usage counters. On top
//! of it sit a few prompt templates (research, batch research, blog drafts)
//! and a small task orchestrator with an execution history.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use puter_ai::{ChatOptions, PuterClient};
//! use puter_ai::skills::{Depth, ResearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> puter_ai::Result<()> {
//!     let client = PuterClient::builder()
//!         .auth_token("your-token")
//!         .max_cache_size(200)
//!         .build()?;
//!
//!     let answer = client.chat("Explain ownership in Rust", ChatOptions::new()).await?;
//!     println!("{answer}");
//!
//!     let report = client
//!         .research("WebAssembly adoption", ResearchOptions::new().depth(Depth::Quick))
//!         .await?;
//!     println!("{report}");
//!
//!     println!("{:?}", client.stats());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, chat options and request execution |
//! | [`cache`] | Cache key derivation and the bounded FIFO response cache |
//! | [`stats`] | Request counters and hit-rate snapshots |
//! | [`skills`] | Research, batch research and blog prompt templates |
//! | [`orchestrator`] | Explicit task dispatch with history and reports |
//! | [`config`] | Configuration defaults, YAML loading and env overrides |
//! | [`transport`] | HTTP driver-call transport |
//! | [`types`] | Messages and tool flags |

pub mod cache;
pub mod client;
pub mod config;
pub mod orchestrator;
pub mod skills;
pub mod stats;
pub mod transport;
pub mod types;

pub use client::{ChatOptions, PuterClient, PuterClientBuilder};
pub use config::ClientConfig;
pub use orchestrator::{ResearchSkill, Task};
pub use stats::StatsSnapshot;
pub use types::{Message, MessagePayload, MessageRole, Tool};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
