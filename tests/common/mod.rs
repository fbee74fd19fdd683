//! Mock Puter server setup for integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use puter_ai::PuterClient;

pub const DRIVER_PATH: &str = "/drivers/call";
pub const TEST_TOKEN: &str = "test-token";

/// Test fixture that owns a mock server and builds clients pointed at it.
pub struct MockPuter {
    pub server: ServerGuard,
}

impl MockPuter {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn client(&self, max_cache_size: usize) -> PuterClient {
        PuterClient::builder()
            .auth_token(TEST_TOKEN)
            .max_cache_size(max_cache_size)
            .base_url_override(self.server.url())
            .build()
            .expect("client should build against mock server")
    }

    /// Successful driver call whose body matches `body` and returns `result`.
    pub async fn mock_result(&mut self, body: Matcher, result: &str, hits: usize) -> Mock {
        let payload = serde_json::json!({ "success": true, "result": result }).to_string();
        self.mock_raw(body, 200, &payload, hits).await
    }

    pub async fn mock_raw(&mut self, body: Matcher, status: usize, payload: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", DRIVER_PATH)
            .match_body(body)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(payload)
            .expect(hits)
            .create_async()
            .await
    }
}

/// Matches a request whose first message is a user message with exactly
/// `content`.
pub fn user_content(content: &str) -> Matcher {
    Matcher::PartialJson(serde_json::json!({
        "args": {"messages": [{"role": "user", "content": content}]}
    }))
}

/// Matches a request whose raw JSON body contains `fragment` verbatim.
pub fn body_contains(fragment: &str) -> Matcher {
    Matcher::Regex(regex::escape(fragment))
}
