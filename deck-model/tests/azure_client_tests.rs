//! HTTP contract tests for the Azure OpenAI client

use deck_model::retry::RetryConfig;
use deck_model::{AzureOpenAiClient, AzureOpenAiConfig, ChatAgent, Llm, LlmRequest, Message, ModelError};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAT_PATH: &str = "/openai/deployments/gpt-4.1-mini/chat/completions";

fn client_for(server: &MockServer) -> AzureOpenAiClient {
    let config = AzureOpenAiConfig::new(format!("{}/openai", server.uri()), "secret");
    AzureOpenAiClient::new(config)
        .unwrap()
        .with_retry_config(
            RetryConfig::default()
                .with_max_retries(2)
                .with_initial_delay(Duration::ZERO)
                .with_max_delay(Duration::ZERO),
        )
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8 }
    })
}

#[derive(Debug, Deserialize, JsonSchema)]
struct Verdict {
    approved: bool,
}

#[tokio::test]
async fn sends_api_key_and_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(query_param("api-version", "2024-10-21"))
        .and(header("api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let response =
        client_for(&server).generate(LlmRequest::new(vec![Message::user("hi")])).await.unwrap();

    assert_eq!(response.content.as_deref(), Some("hello"));
    assert_eq!(response.usage.unwrap().total_tokens, 8);
}

#[tokio::test]
async fn retries_throttled_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("busy"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"approved\":true}")))
        .mount(&server)
        .await;

    let agent = ChatAgent::new("reviewer", "Review.", Arc::new(client_for(&server)));
    let verdict: Option<Verdict> = agent.run_structured("look").await.unwrap();

    assert!(verdict.unwrap().approved);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["response_format"]["json_schema"]["name"], "Verdict");
    assert_eq!(body["response_format"]["json_schema"]["schema"]["additionalProperties"], false);
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).generate(LlmRequest::default()).await.unwrap_err();

    match err {
        ModelError::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_endpoint_is_rejected() {
    let result = AzureOpenAiClient::new(AzureOpenAiConfig::new("  ", "k"));
    assert!(matches!(result, Err(ModelError::Config(_))));
}
