use crate::error::ErrorContext;
use crate::{Error, Result};
use keyring::Entry;
use reqwest::Proxy;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::time::Duration;
use url::Url;

pub const DRIVER_CALL_PATH: &str = "/drivers/call";
pub const CLIENT_USER_AGENT: &str = "puter-js/1.0";
pub const CLIENT_ORIGIN: &str = "https://puter.work";
pub const CLIENT_REFERER: &str = "https://puter.work/";

pub const PROXY_ENV: &str = "PUTER_PROXY_URL";

const KEYRING_SERVICE: &str = "puter";
const KEYRING_USER: &str = "auth_token";

/// Request envelope for the Puter driver endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverCall {
    pub interface: String,
    pub driver: String,
    pub method: String,
    pub args: Value,
}

impl DriverCall {
    /// `ai` / `chat` / `chat` with the given argument object.
    pub fn chat(args: Value) -> Self {
        Self {
            interface: "ai".to_string(),
            driver: "chat".to_string(),
            method: "chat".to_string(),
            args,
        }
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(api_base: &str, auth_token: Option<String>, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(api_base)
            .and_then(|base| base.join(DRIVER_CALL_PATH))
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid api base '{}'", api_base),
                    ErrorContext::new()
                        .with_field_path("api_base")
                        .with_details(e.to_string())
                        .with_source("http_transport"),
                )
            })?;

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(CLIENT_USER_AGENT);

        if let Some(proxy) = proxy_from(env::var(PROXY_ENV).ok()) {
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint,
            auth_token,
        })
    }

    /// Explicit token first, then `PUTER_AUTH_TOKEN`, then the OS keyring.
    pub fn resolve_auth_token(explicit: Option<String>) -> Option<String> {
        if let Some(token) = explicit.filter(|t| !t.is_empty()) {
            return Some(token);
        }
        if let Some(token) = env::var(crate::config::ENV_AUTH_TOKEN)
            .ok()
            .filter(|t| !t.is_empty())
        {
            return Some(token);
        }
        Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .ok()
            .and_then(|entry| entry.get_password().ok())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// POST a driver call and return the parsed JSON body of a 2xx response.
    ///
    /// An empty body parses as `{}`. Non-2xx responses become
    /// [`Error::Remote`] carrying the body's `message` field when present,
    /// otherwise the raw body text.
    pub async fn call(&self, body: &DriverCall, request_id: &str) -> Result<Value> {
        let mut req = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .header("origin", CLIENT_ORIGIN)
            .header("referer", CLIENT_REFERER)
            .header("x-request-id", request_id);

        if let Some(token) = &self.auth_token {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let parsed: std::result::Result<Value, serde_json::Error> = if text.trim().is_empty() {
            Ok(Value::Object(serde_json::Map::new()))
        } else {
            serde_json::from_str(&text)
        };

        if status.is_success() {
            return parsed.map_err(|e| {
                Error::invalid_response_with_context(
                    format!("Failed to parse response: {}", e),
                    ErrorContext::new()
                        .with_details(truncate(&text, 200))
                        .with_source("http_transport"),
                )
            });
        }

        let message = parsed
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("").to_string()
                } else {
                    text.clone()
                }
            });

        Err(Error::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

/// Proxy for every scheme, or `None` when unset or unparseable.
fn proxy_from(raw: Option<String>) -> Option<Proxy> {
    let raw = raw.filter(|v| !v.trim().is_empty())?;
    match Proxy::all(raw.as_str()) {
        Ok(proxy) => Some(proxy),
        Err(e) => {
            tracing::warn!(
                env = PROXY_ENV,
                proxy_url = raw.as_str(),
                error = %e,
                "ignoring invalid proxy url"
            );
            None
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_replaces_base_path() {
        let t = HttpTransport::new("https://api.puter.com", None, Duration::from_secs(5)).unwrap();
        assert_eq!(t.endpoint().as_str(), "https://api.puter.com/drivers/call");

        let t = HttpTransport::new("http://127.0.0.1:9999/ignored/", None, Duration::from_secs(5))
            .unwrap();
        assert_eq!(t.endpoint().as_str(), "http://127.0.0.1:9999/drivers/call");
    }

    #[test]
    fn invalid_base_is_configuration_error() {
        let err = HttpTransport::new("::nope::", None, Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn chat_envelope_shape() {
        let call = DriverCall::chat(serde_json::json!({"model": "m"}));
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "interface": "ai",
                "driver": "chat",
                "method": "chat",
                "args": {"model": "m"}
            })
        );
    }

    #[test]
    fn proxy_url_is_parsed_or_ignored() {
        assert!(proxy_from(None).is_none());
        assert!(proxy_from(Some("  ".into())).is_none());
        assert!(proxy_from(Some("http://proxy.local:notaport".into())).is_none());
        assert!(proxy_from(Some("http://127.0.0.1:3128".into())).is_some());
    }

    #[test]
    fn explicit_token_wins() {
        assert_eq!(
            HttpTransport::resolve_auth_token(Some("tok".into())).as_deref(),
            Some("tok")
        );
    }
}
