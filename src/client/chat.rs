use crate::error::ErrorContext;
use crate::types::Tool;
use crate::{Error, Result};
use serde_json::{Map, Value};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Per-call generation options.
///
/// Unset fields fall back to the client defaults: the configured model,
/// temperature 0.7, 1000 max tokens and no tools. `extra` arguments are
/// copied into the driver call after everything else. An extra named
/// `model`, `temperature` or `max_tokens` replaces the typed field, so it is
/// part of the cache key like any other value of that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub tools: Option<Vec<Tool>>,
    pub extra: Map<String, Value>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Non-finite values are rejected when the request is made.
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    /// Add a provider-specific argument sent verbatim with the call.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Fill unset fields from `defaults`. Anything already set on `self` wins,
    /// including `extra` keys present in both.
    pub fn with_defaults(self, defaults: ChatOptions) -> ChatOptions {
        let mut extra = defaults.extra;
        extra.extend(self.extra);
        ChatOptions {
            model: self.model.or(defaults.model),
            temperature: self.temperature.or(defaults.temperature),
            max_tokens: self.max_tokens.or(defaults.max_tokens),
            tools: self.tools.or(defaults.tools),
            extra,
        }
    }

    pub(crate) fn resolve(&self, default_model: &str) -> Result<ResolvedOptions> {
        let mut extra = self.extra.clone();
        if extra.contains_key("messages") {
            return Err(reserved_arg("messages", "pass the conversation as the chat payload"));
        }

        let model = match extra.remove("model") {
            Some(Value::String(model)) => model,
            Some(_) => return Err(reserved_arg("model", "expected a string")),
            None => self
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
        };
        let temperature = match extra.remove("temperature") {
            Some(v) => v
                .as_f64()
                .ok_or_else(|| reserved_arg("temperature", "expected a number"))?,
            None => self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };
        if !temperature.is_finite() {
            return Err(Error::Validation {
                message: format!("temperature must be finite, got {}", temperature),
                context: ErrorContext::new()
                    .with_field_path("temperature")
                    .with_source("chat_options"),
            });
        }
        let max_tokens = match extra.remove("max_tokens") {
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| reserved_arg("max_tokens", "expected a non-negative 32-bit integer"))?,
            None => self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        Ok(ResolvedOptions {
            model,
            temperature,
            max_tokens,
            tools: self.tools.clone().unwrap_or_default(),
            extra,
        })
    }
}

fn reserved_arg(name: &str, details: &str) -> Error {
    Error::Validation {
        message: format!("invalid extra argument '{}'", name),
        context: ErrorContext::new()
            .with_field_path(format!("extra.{}", name))
            .with_details(details)
            .with_source("chat_options"),
    }
}

/// Options with every default applied. `extra` no longer carries any of the
/// request identity fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub tools: Vec<Tool>,
    pub extra: Map<String, Value>,
}
