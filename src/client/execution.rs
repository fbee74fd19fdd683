//! Request execution: cache lookup, driver call, and outcome bookkeeping.

use super::chat::{ChatOptions, ResolvedOptions};
use super::core::PuterClient;
use crate::error::ErrorContext;
use crate::transport::DriverCall;
use crate::types::{Message, MessagePayload};
use crate::{Error, Result};
use serde_json::{json, Map, Value};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

impl PuterClient {
    /// Exactly one of the hit, success or failure paths runs per call, and
    /// each path touches one counter (two on a miss: total plus outcome).
    pub(crate) async fn execute(
        &self,
        payload: MessagePayload,
        options: ChatOptions,
    ) -> Result<String> {
        let messages = payload.to_messages();
        let resolved = options.resolve(&self.config.default_model)?;
        let key = self.keys.generate(
            &messages,
            &resolved.model,
            resolved.temperature,
            resolved.max_tokens,
        )?;

        let cached = self.cache().get(&key).cloned();
        if let Some(hit) = cached {
            self.stats.record_cache_hit();
            debug!(model = resolved.model.as_str(), "response served from cache");
            return Ok(hit);
        }

        self.stats.record_request();

        let request_id = Uuid::new_v4().to_string();
        let body = DriverCall::chat(build_args(&messages, &resolved));
        let start = Instant::now();

        let outcome = match self.transport.call(&body, &request_id).await {
            Ok(response) => interpret(&response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((text, tokens)) => {
                let evicted = self.cache().set(key, text.clone());
                self.stats.record_success();
                if let Some(n) = tokens {
                    self.stats.record_tokens(n);
                }
                info!(
                    request_id = request_id.as_str(),
                    model = resolved.model.as_str(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    evicted = evicted.is_some(),
                    "puter chat request completed"
                );
                Ok(text)
            }
            Err(e) => {
                self.stats.record_failure();
                warn!(
                    request_id = request_id.as_str(),
                    model = resolved.model.as_str(),
                    http_status = e.status(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "puter chat request failed"
                );
                Err(e)
            }
        }
    }
}

/// Driver-call arguments: resolved fields first, remaining caller extras
/// layered last.
fn build_args(messages: &[Message], resolved: &ResolvedOptions) -> Value {
    let mut args = Map::new();
    args.insert("messages".into(), json!(messages));
    args.insert("model".into(), json!(resolved.model));
    args.insert("temperature".into(), json!(resolved.temperature));
    args.insert("max_tokens".into(), json!(resolved.max_tokens));
    args.insert("tools".into(), json!(resolved.tools));
    args.extend(resolved.extra.clone());
    Value::Object(args)
}

/// Pull the response text (and token usage, when reported) out of a 2xx body.
fn interpret(response: &Value) -> Result<(String, Option<u64>)> {
    let text = response
        .get("result")
        .and_then(extract_result)
        .ok_or_else(|| {
            Error::invalid_response_with_context(
                "Invalid response format",
                ErrorContext::new()
                    .with_field_path("result")
                    .with_source("request_executor"),
            )
        })?;
    Ok((text, extract_total_tokens(response)))
}

fn extract_result(result: &Value) -> Option<String> {
    match result {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => match obj
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
        {
            Some(content) => Some(content.to_string()),
            None => Some(result.to_string()),
        },
        other => Some(other.to_string()),
    }
}

fn extract_total_tokens(response: &Value) -> Option<u64> {
    let total = |v: &Value| v.get("usage")?.get("total_tokens")?.as_u64();
    total(response).or_else(|| response.get("result").and_then(total))
}
