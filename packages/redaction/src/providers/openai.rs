//! LLM-prompt-based PII detection via the OpenAI chat completions API.
//!
//! The model is asked to list each PII token or token group verbatim, one
//! per line; the response is split on newlines into PII values. No JSON
//! schema is involved because the values must be reproduced exactly as they
//! appear in the extracted text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RedactionError, Result};
use crate::traits::PiiDetector;

const DETECTION_PROMPT: &str = "You are detecting personally identifiable information (PII) in the provided text.\n\
List each token or group of tokens in the text that may contain PII (for example: credit card numbers, security codes, names, addresses).\n\
Do not modify or change the text in any way, or add labels.\n\
Exclude labels, descriptive text, other text elements which may refer to or label PII, but are not actually PII themselves (for example: \"Card number\", \"Expiration\", \"Country\").\n\
Also exclude text artifacts, incorrectly extracted text, or miscellaneous text that is unrelated to the PII.\n\
Display each piece of PII as-is with no additional quotes, symbols, or other characters:";

/// PII detection using an OpenAI chat model.
#[derive(Clone)]
pub struct OpenAiDetector {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiDetector {
    /// Create a new detector with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| RedactionError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure OpenAI, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Parse a model response into PII values, one per non-empty line.
    fn parse_response(response_text: &str) -> Vec<String> {
        response_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    n: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl PiiDetector for OpenAiDetector {
    async fn detect(&self, text: &str) -> Result<Vec<String>> {
        debug!(chars = text.len(), model = %self.model, "OpenAI PII detection starting");

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: format!("{DETECTION_PROMPT}\n\n{text}"),
            }],
            temperature: 0.0,
            max_tokens: 512,
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(RedactionError::detection)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RedactionError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await.map_err(RedactionError::detection)?;

        let Some(content) = body.choices.into_iter().next().and_then(|c| c.message.content)
        else {
            warn!("empty response from model, treating as no PII found");
            return Ok(Vec::new());
        };

        let entities = Self::parse_response(&content);
        debug!(count = entities.len(), "OpenAI PII detection completed");
        Ok(entities)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_one_entity_per_line() {
        let response = "John Doe\n4532 1234 5678 9010\n\n  123 Main St  \n";
        assert_eq!(
            OpenAiDetector::parse_response(response),
            vec!["John Doe", "4532 1234 5678 9010", "123 Main St"]
        );
    }

    #[test]
    fn test_parse_response_empty() {
        assert!(OpenAiDetector::parse_response("").is_empty());
        assert!(OpenAiDetector::parse_response("\n  \n").is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let detector = OpenAiDetector::new("sk-test")
            .with_model("gpt-4o-mini")
            .with_base_url("https://proxy.example.com/v1/");

        assert_eq!(detector.model, "gpt-4o-mini");
        assert_eq!(detector.base_url, "https://proxy.example.com/v1");
    }
}
