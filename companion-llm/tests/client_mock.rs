//! HTTP-level tests for `LlmClient` against a mock completion service.

use companion_llm::{ChatBackend, ChatMessage, CompletionSettings, LlmClient, LlmError, LlmProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings() -> CompletionSettings {
    CompletionSettings {
        model: "test-model".into(),
        max_tokens: 150,
        temperature: 0.7,
        timeout_ms: 2_000,
    }
}

fn openai(server: &MockServer, retries: u32) -> LlmClient {
    LlmClient::new(
        LlmProvider::OpenAiCompatible {
            base_url: server.uri(),
            api_key: "sk-test".into(),
        },
        settings(),
        retries,
    )
}

fn conversation() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are Alice."),
        ChatMessage::user("I love music"),
    ]
}

// ── OpenAI-compatible ──────────────────────────────────────

#[tokio::test]
async fn openai_reply_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 150,
            "messages": [
                { "role": "system", "content": "You are Alice." },
                { "role": "user", "content": "I love music" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Me too! What do you listen to?  " } }],
            "usage": { "completion_tokens": 9 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = openai(&server, 0).complete(&conversation()).await.expect("reply");
    assert_eq!(reply.text, "Me too! What do you listen to?");
    assert_eq!(reply.tokens_generated, 9);
    assert_eq!(reply.model, "test-model");
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let err = openai(&server, 2).complete(&conversation()).await;
    match err {
        Err(LlmError::RetriesExhausted { attempts, last_error }) => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("500"), "{last_error}");
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn single_attempt_surfaces_the_underlying_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = openai(&server, 0).complete(&conversation()).await;
    assert!(matches!(err, Err(LlmError::Status { status: 401, .. })));
}

#[tokio::test]
async fn rejected_key_is_not_retried_and_reads_as_one_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            "{\n    \"error\": {\n        \"message\": \"Incorrect API key provided: sk-test.\",\n        \"type\": \"invalid_request_error\",\n        \"code\": \"invalid_api_key\"\n    }\n}\n",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = openai(&server, 1)
        .complete(&conversation())
        .await
        .expect_err("a rejected key cannot succeed");
    let notice = format!("Error when calling API: {err}");
    assert_eq!(notice.lines().count(), 1, "{notice}");
    assert!(notice.contains("HTTP 401: Incorrect API key provided"), "{notice}");
}

#[tokio::test]
async fn rate_limit_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = openai(&server, 1).complete(&conversation()).await;
    assert!(
        matches!(err, Err(LlmError::RetriesExhausted { attempts: 2, ref last_error }) if last_error.contains("Rate limit")),
        "{err:?}"
    );
}

#[tokio::test]
async fn missing_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let err = openai(&server, 3).complete(&conversation()).await;
    assert!(matches!(err, Err(LlmError::MalformedResponse(_))));
}

#[tokio::test]
async fn blank_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "   " } }]
        })))
        .mount(&server)
        .await;

    let err = openai(&server, 0).complete(&conversation()).await;
    assert!(matches!(err, Err(LlmError::MalformedResponse(_))));
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = openai(&server, 0).complete(&conversation()).await;
    assert!(matches!(err, Err(LlmError::ParseError(_))));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(500))
                .set_body_json(json!({ "choices": [{ "message": { "content": "late" } }] })),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new(
        LlmProvider::OpenAiCompatible {
            base_url: server.uri(),
            api_key: "sk-test".into(),
        },
        CompletionSettings {
            timeout_ms: 50,
            ..settings()
        },
        0,
    );
    let err = client.complete(&conversation()).await;
    assert!(matches!(err, Err(LlmError::Timeout(50))));
}

#[tokio::test]
async fn unreachable_service_fails_without_panicking() {
    let client = LlmClient::new(
        LlmProvider::OpenAiCompatible {
            base_url: "http://127.0.0.1:1".into(),
            api_key: "sk-test".into(),
        },
        settings(),
        0,
    );
    assert!(client.complete(&conversation()).await.is_err());
}

// ── Ollama ─────────────────────────────────────────────────

#[tokio::test]
async fn ollama_reply_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "model": "test-model", "stream": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "Hi there!" },
            "eval_count": 4,
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(
        LlmProvider::Ollama {
            base_url: format!("{}/", server.uri()),
        },
        settings(),
        0,
    );
    assert!(client.is_available());
    let reply = client.complete(&conversation()).await.expect("reply");
    assert_eq!(reply.text, "Hi there!");
    assert_eq!(reply.tokens_generated, 4);
}
