//! Research and batch research templates.

use crate::client::{ChatOptions, PuterClient};
use crate::types::Tool;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

pub const RESEARCH_MODEL: &str = "perplexity/sonar-deep-research";
pub const RESEARCH_TEMPERATURE: f64 = 0.3;
pub const RESEARCH_MAX_TOKENS: u32 = 2000;
pub const BATCH_RESEARCH_MAX_TOKENS: u32 = 4000;

/// How much detail a research answer should go into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Quick,
    #[default]
    Medium,
    Deep,
}

impl Depth {
    fn directive(self) -> Option<&'static str> {
        match self {
            Depth::Quick => Some("Provide concise summary with key takeaways."),
            Depth::Medium => None,
            Depth::Deep => Some("Provide very detailed analysis with multiple perspectives."),
        }
    }
}

impl std::str::FromStr for Depth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Depth::Quick),
            "medium" => Ok(Depth::Medium),
            "deep" => Ok(Depth::Deep),
            other => Err(Error::validation(format!(
                "unknown research depth '{}', expected quick, medium or deep",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchOptions {
    pub depth: Depth,
    pub include_sources: bool,
    /// Overrides for the research defaults (model, temperature, ...).
    pub chat: ChatOptions,
}

impl ResearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    pub fn include_sources(mut self, include: bool) -> Self {
        self.include_sources = include;
        self
    }

    pub fn chat(mut self, chat: ChatOptions) -> Self {
        self.chat = chat;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResearchOptions {
    pub chat: ChatOptions,
}

impl BatchResearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat(mut self, chat: ChatOptions) -> Self {
        self.chat = chat;
        self
    }
}

pub fn research_prompt(topic: &str, options: &ResearchOptions) -> String {
    let mut prompt = format!(
        "Please conduct comprehensive research on: \"{topic}\"\n\n\
         Provide:\n\
         1. Overview and key facts\n\
         2. Current trends and developments\n\
         3. Statistics and data points\n\
         4. Key players/companies/organizations involved\n\
         5. Future predictions and outlook\n\
         6. Controversies or debates\n\
         7. Recommended sources for further reading"
    );
    if options.include_sources {
        prompt.push_str("\n\nPlease include specific sources and citations.");
    }
    if let Some(directive) = options.depth.directive() {
        prompt.push_str("\n\n");
        prompt.push_str(directive);
    }
    prompt
}

/// One instruction covering every topic, so a batch costs a single request.
pub fn batch_research_prompt<S: AsRef<str>>(topics: &[S]) -> String {
    let mut prompt = format!(
        "Please research the following {} topics comprehensively:\n\n",
        topics.len()
    );
    for (i, topic) in topics.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", i + 1, topic.as_ref());
    }
    prompt.push_str(
        "\nFor each topic, provide:\n\
         - Key facts and overview\n\
         - Important developments\n\
         - Relevant statistics\n\
         - Future outlook\n\n\
         Structure the response as a numbered list for each topic.",
    );
    prompt
}

fn research_defaults() -> ChatOptions {
    ChatOptions::new()
        .model(RESEARCH_MODEL)
        .temperature(RESEARCH_TEMPERATURE)
        .max_tokens(RESEARCH_MAX_TOKENS)
        .tool(Tool::web_search())
}

fn batch_defaults() -> ChatOptions {
    ChatOptions::new()
        .model(RESEARCH_MODEL)
        .max_tokens(BATCH_RESEARCH_MAX_TOKENS)
        .tool(Tool::web_search())
}

impl PuterClient {
    /// Web-search backed research on a single topic.
    pub async fn research(&self, topic: &str, options: ResearchOptions) -> Result<String> {
        let prompt = research_prompt(topic, &options);
        debug!(depth = ?options.depth, include_sources = options.include_sources, "research prompt built");
        self.chat(prompt, options.chat.with_defaults(research_defaults()))
            .await
    }

    /// Research several topics with one request.
    pub async fn batch_research<S: AsRef<str>>(
        &self,
        topics: &[S],
        options: BatchResearchOptions,
    ) -> Result<String> {
        if topics.is_empty() {
            return Err(Error::validation("batch research needs at least one topic"));
        }
        let prompt = batch_research_prompt(topics);
        debug!(topics = topics.len(), "batch research prompt built");
        self.chat(prompt, options.chat.with_defaults(batch_defaults()))
            .await
    }
}
