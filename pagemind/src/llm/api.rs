use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{PagemindError, Result};

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Body of a non-streaming `/api/generate` response. Ollama sends more
/// fields (`model`, `created_at`, timing counters); only the generated text
/// matters here, and a missing field maps to an empty answer.
#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for Ollama's native generate endpoint.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PagemindError::Llm(format!("Failed to create LLM HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Run a single non-streaming completion and return the generated text.
    ///
    /// The body is read as text before parsing so that a non-JSON reply can
    /// be surfaced verbatim as [`PagemindError::LlmMalformed`]. An HTTP-level
    /// error body that *is* JSON simply yields an empty answer, which callers
    /// substitute with their own fallback text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(PagemindError::Validation("Prompt cannot be empty".to_string()));
        }

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|_| PagemindError::LlmMalformed { body })?;

        Ok(parsed.response)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;

    fn test_config(base_url: &str) -> LlmConfig {
        LlmConfig {
            model: "qwen3:0.6b".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let client = LlmClient::new(&test_config("http://localhost:11434/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model(), "qwen3:0.6b");
    }

    #[test]
    fn generate_response_tolerates_missing_field() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(parsed.response, "");
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_any_request() {
        let client = LlmClient::new(&test_config("http://localhost:11434")).unwrap();
        let err = client.generate("   ").await.unwrap_err();
        assert!(matches!(err, PagemindError::Validation(_)));
    }
}
