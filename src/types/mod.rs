//! # Types Module
//!
//! Core request types shared by the client, the cache key deriver and the
//! prompt templates.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and content |
//! | [`MessageRole`] | Message role (system, user, assistant) |
//! | [`MessagePayload`] | Bare prompt or full conversation passed to `chat` |
//! | [`Tool`] | Provider capability flag such as web search |
//!
//! ## Example
//!
//! ```rust
//! use puter_ai::types::{Message, MessagePayload, Tool};
//!
//! let convo: MessagePayload = vec![
//!     Message::system("You are a helpful assistant"),
//!     Message::user("What's new in Rust?"),
//! ]
//! .into();
//! let prompt: MessagePayload = "Summarize the Rust 2024 edition".into();
//! let tools = vec![Tool::web_search()];
//! # let _ = (convo, prompt, tools);
//! ```

pub mod message;
pub mod tool;

pub use message::{Message, MessagePayload, MessageRole};
pub use tool::Tool;
