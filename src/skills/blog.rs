//! Blog drafting template.

use super::research::{Depth, ResearchOptions};
use crate::client::{ChatOptions, PuterClient};
use crate::Result;

pub const BLOG_MODEL: &str = "openai/gpt-4";
pub const BLOG_TEMPERATURE: f64 = 0.8;
pub const BLOG_MAX_TOKENS: u32 = 3000;
/// Characters of research output embedded in the blog prompt.
pub const RESEARCH_EXCERPT_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct BlogOptions {
    /// Target length, e.g. "1500 words".
    pub length: String,
    pub tone: String,
    /// Run a deep research pass first and ground the post in it.
    pub include_research: bool,
    pub keywords: Vec<String>,
    pub chat: ChatOptions,
}

impl Default for BlogOptions {
    fn default() -> Self {
        Self {
            length: "1500 words".to_string(),
            tone: "professional".to_string(),
            include_research: true,
            keywords: Vec::new(),
            chat: ChatOptions::default(),
        }
    }
}

impl BlogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: impl Into<String>) -> Self {
        self.length = length.into();
        self
    }

    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn include_research(mut self, include: bool) -> Self {
        self.include_research = include;
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn chat(mut self, chat: ChatOptions) -> Self {
        self.chat = chat;
        self
    }
}

pub fn blog_prompt(topic: &str, options: &BlogOptions, research: Option<&str>) -> String {
    let mut prompt = format!(
        "Write a {} blog post about \"{}\" in a {} tone.",
        options.length, topic, options.tone
    );
    if let Some(research) = research {
        let excerpt: String = research.chars().take(RESEARCH_EXCERPT_CHARS).collect();
        prompt.push_str(&format!("\n\nBased on this research: {}...", excerpt));
    }
    if !options.keywords.is_empty() {
        prompt.push_str(&format!(
            "\n\nNaturally incorporate these keywords: {}.",
            options.keywords.join(", ")
        ));
    }
    prompt.push_str(
        "\n\nStructure:\n\
         1. Engaging introduction\n\
         2. Main content with sections/subheadings\n\
         3. Data and examples\n\
         4. Analysis and insights\n\
         5. Conclusion with key takeaways\n\
         6. Call to action or final thoughts\n\n\
         Write in markdown format with appropriate headings.",
    );
    prompt
}

fn blog_defaults() -> ChatOptions {
    ChatOptions::new()
        .model(BLOG_MODEL)
        .temperature(BLOG_TEMPERATURE)
        .max_tokens(BLOG_MAX_TOKENS)
}

impl PuterClient {
    /// Draft a markdown blog post, optionally grounded in a research pass.
    ///
    /// A failed research pass fails the whole draft.
    pub async fn draft_blog(&self, topic: &str, options: BlogOptions) -> Result<String> {
        let research = if options.include_research {
            let opts = ResearchOptions::new()
                .depth(Depth::Deep)
                .include_sources(true);
            Some(self.research(topic, opts).await?)
        } else {
            None
        };

        let prompt = blog_prompt(topic, &options, research.as_deref());
        self.chat(prompt, options.chat.with_defaults(blog_defaults()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_professional_post() {
        let p = blog_prompt("Rust async", &BlogOptions::new(), None);
        assert!(p.starts_with("Write a 1500 words blog post about \"Rust async\" in a professional tone."));
        assert!(!p.contains("Based on this research"));
        assert!(p.ends_with("Write in markdown format with appropriate headings."));
    }

    #[test]
    fn research_is_truncated_on_char_boundaries() {
        let research = "é".repeat(RESEARCH_EXCERPT_CHARS + 50);
        let p = blog_prompt("t", &BlogOptions::new(), Some(&research));
        let expected = format!("Based on this research: {}...", "é".repeat(RESEARCH_EXCERPT_CHARS));
        assert!(p.contains(&expected));
        assert!(!p.contains(&"é".repeat(RESEARCH_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn keywords_and_tone_are_embedded() {
        let opts = BlogOptions::new()
            .tone("casual")
            .length("800 words")
            .keyword("tokio")
            .keyword("async");
        let p = blog_prompt("t", &opts, None);
        assert!(p.contains("Write a 800 words blog post about \"t\" in a casual tone."));
        assert!(p.contains("Naturally incorporate these keywords: tokio, async."));
    }
}
