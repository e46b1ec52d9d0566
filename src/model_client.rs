use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::config::Config;
use crate::errors::AppError;

/// Seam over the model provider.
///
/// Every provider failure (network, auth, quota, malformed response) surfaces
/// as one opaque `ExternalApiError`; callers cannot distinguish or repair the
/// cause, and nothing is retried.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// One-shot completion returning the full response text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError>;

    /// Streaming completion.
    ///
    /// Forwards each text fragment through `fragment_tx` in arrival order and
    /// returns the full accumulated text once the provider closes the stream.
    async fn complete_stream(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        fragment_tx: mpsc::Sender<String>,
    ) -> Result<String, AppError>;
}

/// Production `ModelClient` backed by the OpenAI chat completions API.
///
/// Constructed once at startup and shared read-only across requests. No
/// request timeout is configured, so a hung provider connection blocks that
/// request until the provider closes it.
pub struct OpenAiModelClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelClient {
    /// Creates a client from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
        if let Some(ref base_url) = config.openai_base_url {
            openai_config = openai_config.with_api_base(base_url.clone());
        }

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    fn build_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        stream: bool,
    ) -> Result<async_openai::types::chat::CreateChatCompletionRequest, AppError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                system_prompt,
            )),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(user_prompt)),
        ]);
        if stream {
            args.stream(true);
        }

        args.build()
            .map_err(|e| AppError::InternalError(format!("Failed to build model request: {}", e)))
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        let request = self.build_request(system_prompt, user_prompt, false)?;
        tracing::debug!("Requesting one-shot completion from model {}", self.model);

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::ExternalApiError(format!("OpenAI API error: {}", e)))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AppError::ExternalApiError("OpenAI returned no choices".to_string())
        })?;

        let content = choice.message.content.unwrap_or_default();
        tracing::debug!("Model returned {} chars", content.len());
        Ok(content)
    }

    async fn complete_stream(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        fragment_tx: mpsc::Sender<String>,
    ) -> Result<String, AppError> {
        let request = self.build_request(system_prompt, user_prompt, true)?;
        tracing::debug!("Opening completion stream with model {}", self.model);

        let mut stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| AppError::ExternalApiError(format!("OpenAI stream error: {}", e)))?;

        let mut full_content = String::new();
        let mut fragment_count = 0usize;

        while let Some(result) = stream.next().await {
            let response = result
                .map_err(|e| AppError::ExternalApiError(format!("OpenAI stream error: {}", e)))?;

            for choice in response.choices {
                // Empty fragments are forwarded too; downstream re-extraction
                // is a no-op for them but ordering must match arrival order.
                if let Some(content) = choice.delta.content {
                    full_content.push_str(&content);
                    fragment_count += 1;
                    // Receiver dropping means the caller went away; keep
                    // draining so the accumulated text stays complete.
                    let _ = fragment_tx.send(content).await;
                }
            }
        }

        tracing::debug!(
            "Completion stream closed after {} fragments ({} chars)",
            fragment_count,
            full_content.len()
        );
        Ok(full_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: Option<&str>) -> Config {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_model: "gpt-4o".to_string(),
            openai_base_url: base_url.map(str::to_string),
            port: 8003,
        }
    }

    #[test]
    fn test_client_creation() {
        let _ = OpenAiModelClient::new(&test_config(None));
        let _ = OpenAiModelClient::new(&test_config(Some("http://localhost:4000")));
    }

    #[test]
    fn test_build_request_sets_stream_flag() {
        let client = OpenAiModelClient::new(&test_config(None));
        let request = client.build_request("system", "user", true).unwrap();
        assert_eq!(request.stream, Some(true));

        let request = client.build_request("system", "user", false).unwrap();
        assert_ne!(request.stream, Some(true));
    }

    #[tokio::test]
    async fn test_complete_against_unreachable_base_returns_external_error() {
        let client = OpenAiModelClient::new(&test_config(Some("http://127.0.0.1:1")));
        let result = client.complete("system", "user").await;
        assert!(matches!(result, Err(AppError::ExternalApiError(_))));
    }
}
