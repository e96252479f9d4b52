//! OpenAI completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::TextProvider;
use crate::config::GenerationConfig;
use crate::http;
use crate::{ProviderKind, Result, StargazerError};

/// Text generation client for the OpenAI completions endpoint
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiCompletionClient {
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = http::build_client(ProviderKind::TextGeneration, config.timeout())?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiCompletionClient {
    #[instrument(skip(self), fields(provider = "openai"))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self
            .client
            .post(format!("{}/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt));

        let response: CompletionResponse =
            http::send_json(ProviderKind::TextGeneration, request).await?;

        response.into_text()
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

impl CompletionResponse {
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.text.trim().to_string())
            .ok_or_else(|| {
                StargazerError::invalid_response(
                    ProviderKind::TextGeneration,
                    "completion returned no choices",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiCompletionClient {
        let config = GenerationConfig {
            api_key: "sk-test-123456".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 150,
            timeout_seconds: 5,
        };
        OpenAiCompletionClient::new(&config).unwrap()
    }

    #[test]
    fn test_request_body() {
        let client = client();
        let body = serde_json::to_value(client.request_body("Describe Orion.")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-3.5-turbo-instruct",
                "prompt": "Describe Orion.",
                "max_tokens": 150
            })
        );
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{
            "id": "cmpl-1",
            "object": "text_completion",
            "choices": [{"text": "\n\nOrion dominates the southern sky.", "index": 0, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 150}
        }"#;
        let response: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_text().unwrap(),
            "Orion dominates the southern sky."
        );
    }

    #[test]
    fn test_no_choices_is_invalid() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = response.into_text().unwrap_err();
        assert!(matches!(err, StargazerError::InvalidResponse { .. }));
    }
}
