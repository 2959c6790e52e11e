// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat completions API.
//!
//! One request per completion, no internal retry; failures become the
//! engine's fallback path.

use std::time::Duration;

use async_trait::async_trait;
use parlor_config::model::OpenAiConfig;
use parlor_core::{CompletionProvider, ParlorError};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// Base URL for the OpenAI API.
const API_BASE_URL: &str = "https://api.openai.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client from configuration.
    ///
    /// Fails when the API key is absent or not a valid header value.
    pub fn new(config: &OpenAiConfig) -> Result<Self, ParlorError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| ParlorError::Config("openai.api_key is not set".into()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| ParlorError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ParlorError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ParlorError> {
        let request = ChatCompletionRequest::from_prompt(&self.model, prompt);
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| ParlorError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "chat completion response received");

        let body = response.text().await.map_err(|e| ParlorError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(ParlorError::Provider {
                message,
                source: None,
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| ParlorError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        match parsed.first_text() {
            Some(text) => Ok(text.to_string()),
            None => Err(ParlorError::Provider {
                message: "response contained no choices".into(),
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: Some("test-api-key".into()),
            model: "gpt-4".into(),
        }
    }

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new(&test_config())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = OpenAiConfig {
            api_key: None,
            model: "gpt-4".into(),
        };
        let err = OpenAiClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("openai.api_key"));
    }

    #[tokio::test]
    async fn complete_extracts_first_choice_content() {
        let server = MockServer::start().await;
        let response_body = serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Happy to help!"}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let text = client.complete("billing question").await.unwrap();
        assert_eq!(text, "Happy to help!");
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Incorrect API key provided"}
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete("anything").await.unwrap_err();
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[tokio::test]
    async fn rate_limit_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.complete("anything").await.is_err());
    }
}
