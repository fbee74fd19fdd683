//! # Prompt Templates
//!
//! Higher-level operations built on [`PuterClient::chat`](crate::PuterClient::chat).
//! Each template renders an instruction, picks task-appropriate defaults and
//! delegates to the client, so results share its cache and statistics.
//!
//! | Operation | Defaults |
//! |-----------|----------|
//! | [`PuterClient::research`](crate::PuterClient::research) | `perplexity/sonar-deep-research`, temperature 0.3, 2000 tokens, web search |
//! | [`PuterClient::batch_research`](crate::PuterClient::batch_research) | same model, 4000 tokens, web search, one request for all topics |
//! | [`PuterClient::draft_blog`](crate::PuterClient::draft_blog) | `openai/gpt-4`, temperature 0.8, 3000 tokens |
//!
//! Options passed by the caller always override these defaults.

pub mod blog;
pub mod research;

pub use blog::{blog_prompt, BlogOptions};
pub use research::{
    batch_research_prompt, research_prompt, BatchResearchOptions, Depth, ResearchOptions,
};
