//! Prompt templates driven end to end through a mock Puter endpoint.

mod common;

use common::{body_contains, MockPuter};
use mockito::Matcher;
use puter_ai::skills::{BatchResearchOptions, BlogOptions, Depth, ResearchOptions};
use puter_ai::{ChatOptions, Error};
use serde_json::json;

#[tokio::test]
async fn batch_research_issues_a_single_call() {
    let mut fx = MockPuter::new().await;
    let mock = fx
        .mock_result(
            Matcher::AllOf(vec![
                body_contains("1. rust"),
                body_contains("2. go"),
                body_contains("3. zig"),
                Matcher::PartialJson(json!({
                    "args": {
                        "model": "perplexity/sonar-deep-research",
                        "max_tokens": 4000,
                        "temperature": 0.7,
                        "tools": [{"type": "web_search"}]
                    }
                })),
            ]),
            "three answers",
            1,
        )
        .await;
    let client = fx.client(100);

    let out = client
        .batch_research(&["rust", "go", "zig"], BatchResearchOptions::new())
        .await
        .unwrap();

    assert_eq!(out, "three answers");
    assert_eq!(client.stats().total_requests, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_batch_is_rejected_before_any_request() {
    let fx = MockPuter::new().await;
    let client = fx.client(100);

    let topics: [&str; 0] = [];
    let err = client
        .batch_research(&topics, BatchResearchOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    let stats = client.stats();
    assert_eq!(stats.total_requests, 0);
    assert_eq!(stats.failed_requests, 0);
}

#[tokio::test]
async fn research_uses_factual_defaults_and_web_search() {
    let mut fx = MockPuter::new().await;
    let mock = fx
        .mock_result(
            Matcher::AllOf(vec![
                body_contains("research on: \\\"quantum networking\\\""),
                body_contains("Provide concise summary with key takeaways."),
                Matcher::PartialJson(json!({
                    "args": {
                        "model": "perplexity/sonar-deep-research",
                        "temperature": 0.3,
                        "max_tokens": 2000,
                        "tools": [{"type": "web_search"}]
                    }
                })),
            ]),
            "findings",
            1,
        )
        .await;
    let client = fx.client(100);

    let out = client
        .research("quantum networking", ResearchOptions::new().depth(Depth::Quick))
        .await
        .unwrap();
    assert_eq!(out, "findings");
    mock.assert_async().await;
}

#[tokio::test]
async fn research_overrides_win() {
    let mut fx = MockPuter::new().await;
    let mock = fx
        .mock_result(
            Matcher::PartialJson(json!({
                "args": {"model": "openai/gpt-4o", "temperature": 0.1, "max_tokens": 2000}
            })),
            "ok",
            1,
        )
        .await;
    let client = fx.client(100);

    let opts = ResearchOptions::new().chat(ChatOptions::new().model("openai/gpt-4o").temperature(0.1));
    client.research("anything", opts).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn blog_is_grounded_in_truncated_research() {
    let mut fx = MockPuter::new().await;
    let research = fx
        .mock_result(
            Matcher::AllOf(vec![
                body_contains("conduct comprehensive research"),
                body_contains("Please include specific sources and citations."),
                body_contains("Provide very detailed analysis with multiple perspectives."),
            ]),
            &"R".repeat(1500),
            1,
        )
        .await;
    let blog = fx
        .mock_result(
            Matcher::AllOf(vec![
                body_contains("blog post about"),
                Matcher::Regex(r": R{1000}\.\.\.".to_string()),
                Matcher::PartialJson(json!({
                    "args": {"model": "openai/gpt-4", "temperature": 0.8, "max_tokens": 3000}
                })),
            ]),
            "# Post",
            1,
        )
        .await;
    let client = fx.client(100);

    let out = client
        .draft_blog("edge computing", BlogOptions::new())
        .await
        .unwrap();

    assert_eq!(out, "# Post");
    assert_eq!(client.stats().total_requests, 2);
    research.assert_async().await;
    blog.assert_async().await;
}

#[tokio::test]
async fn research_failure_aborts_blog() {
    let mut fx = MockPuter::new().await;
    let _research = fx
        .mock_raw(
            body_contains("conduct comprehensive research"),
            500,
            r#"{"message":"server error"}"#,
            1,
        )
        .await;
    let blog = fx
        .mock_result(body_contains("blog post about"), "never", 0)
        .await;
    let client = fx.client(100);

    let err = client
        .draft_blog("edge computing", BlogOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    let stats = client.stats();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.failed_requests, 1);
    blog.assert_async().await;
}

#[tokio::test]
async fn blog_without_research_makes_one_call() {
    let mut fx = MockPuter::new().await;
    let blog = fx
        .mock_result(
            Matcher::AllOf(vec![
                body_contains("in a casual tone"),
                body_contains("Naturally incorporate these keywords: tokio."),
            ]),
            "# Short",
            1,
        )
        .await;
    let client = fx.client(100);

    let opts = BlogOptions::new()
        .tone("casual")
        .keyword("tokio")
        .include_research(false);
    assert_eq!(client.draft_blog("async rust", opts).await.unwrap(), "# Short");
    assert_eq!(client.stats().total_requests, 1);
    blog.assert_async().await;
}
