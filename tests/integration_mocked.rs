/// Integration tests with a mocked OpenAI endpoint
/// Tests the model client against wiremock without hitting the real provider
use tokio::sync::mpsc;
use travel_insight_api::config::Config;
use travel_insight_api::errors::AppError;
use travel_insight_api::model_client::{ModelClient, OpenAiModelClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create test config pointing at a mock server
fn create_test_config(base_url: String) -> Config {
    Config {
        openai_api_key: "test_key".to_string(),
        openai_model: "gpt-4o".to_string(),
        openai_base_url: Some(base_url),
        port: 8003,
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

fn stream_chunk(content: &str) -> String {
    let chunk = serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "gpt-4o",
        "choices": [
            {
                "index": 0,
                "delta": {"role": "assistant", "content": content},
                "finish_reason": null
            }
        ]
    });
    format!("data: {}\n\n", chunk)
}

#[tokio::test]
async fn test_complete_returns_message_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("1. Likes travel (because of passions list)")),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let client = OpenAiModelClient::new(&config);

    let result = client.complete("system", "user").await;
    assert_eq!(
        result.unwrap(),
        "1. Likes travel (because of passions list)"
    );
}

#[tokio::test]
async fn test_complete_provider_error_surfaces_as_external_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"error": {"message": "quota exceeded"}})),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let client = OpenAiModelClient::new(&config);

    let result = client.complete("system", "user").await;
    assert!(matches!(result, Err(AppError::ExternalApiError(_))));
}

#[tokio::test]
async fn test_complete_stream_forwards_fragments_in_order() {
    let mock_server = MockServer::start().await;

    let body = format!(
        "{}{}{}data: [DONE]\n\n",
        stream_chunk("1. A"),
        stream_chunk(" is"),
        stream_chunk(" true")
    );

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let client = OpenAiModelClient::new(&config);

    let (tx, mut rx) = mpsc::channel(16);
    let full_text = client.complete_stream("system", "user", tx).await.unwrap();
    assert_eq!(full_text, "1. A is true");

    let mut fragments = Vec::new();
    while let Some(fragment) = rx.recv().await {
        fragments.push(fragment);
    }
    assert_eq!(fragments, vec!["1. A", " is", " true"]);
}

#[tokio::test]
async fn test_complete_stream_provider_error_surfaces_as_external_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({"error": {"message": "invalid api key"}}),
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let client = OpenAiModelClient::new(&config);

    let (tx, _rx) = mpsc::channel(16);
    let result = client.complete_stream("system", "user", tx).await;
    assert!(matches!(result, Err(AppError::ExternalApiError(_))));
}
