//! Azure Language Service PII detection provider.
//!
//! Calls the `:analyze-text` endpoint with the `PiiEntityRecognition` kind
//! and collects the flagged entity texts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RedactionError, Result};
use crate::traits::PiiDetector;

const API_VERSION: &str = "2023-04-01";

/// PII detection via the Azure Language Service.
#[derive(Clone)]
pub struct AzureLanguageDetector {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    language: String,
}

impl AzureLanguageDetector {
    /// Create a new detector for the given Language Service endpoint.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            key: key.into(),
            language: "en".to_string(),
        }
    }

    /// Set the document language hint (default: "en").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    kind: &'static str,
    #[serde(rename = "analysisInput")]
    analysis_input: AnalysisInput<'a>,
}

#[derive(Serialize)]
struct AnalysisInput<'a> {
    documents: Vec<AnalysisDocument<'a>>,
}

#[derive(Serialize)]
struct AnalysisDocument<'a> {
    id: &'static str,
    language: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    results: AnalyzeResults,
}

#[derive(Deserialize)]
struct AnalyzeResults {
    #[serde(default)]
    documents: Vec<ResultDocument>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct ResultDocument {
    #[serde(default)]
    entities: Vec<PiiEntity>,
}

#[derive(Deserialize)]
struct PiiEntity {
    text: String,
    #[serde(default)]
    category: String,
}

#[async_trait]
impl PiiDetector for AzureLanguageDetector {
    async fn detect(&self, text: &str) -> Result<Vec<String>> {
        debug!(chars = text.len(), "Azure PII detection starting");

        let request = AnalyzeRequest {
            kind: "PiiEntityRecognition",
            analysis_input: AnalysisInput {
                documents: vec![AnalysisDocument {
                    id: "1",
                    language: &self.language,
                    text,
                }],
            },
        };

        let url = format!(
            "{}/language/:analyze-text?api-version={}",
            self.endpoint, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
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

        let body: AnalyzeResponse = response.json().await.map_err(RedactionError::detection)?;

        if !body.results.errors.is_empty() {
            warn!(
                errors = body.results.errors.len(),
                "Azure reported document-level errors"
            );
        }

        let entities: Vec<String> = body
            .results
            .documents
            .into_iter()
            .flat_map(|doc| doc.entities)
            .inspect(|entity| {
                debug!(category = %entity.category, "found PII entity");
            })
            .map(|entity| entity.text)
            .collect();

        debug!(count = entities.len(), "Azure PII detection completed");
        Ok(entities)
    }

    fn name(&self) -> &str {
        "azure-language"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let detector = AzureLanguageDetector::new("https://example.cognitiveservices.azure.com/", "key");
        assert_eq!(
            detector.endpoint,
            "https://example.cognitiveservices.azure.com"
        );
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "kind": "PiiEntityRecognitionResults",
            "results": {
                "documents": [{
                    "id": "1",
                    "entities": [
                        {"text": "John Doe", "category": "Person", "offset": 0, "length": 8, "confidenceScore": 0.92},
                        {"text": "4532 1234 5678 9010", "category": "CreditCardNumber", "offset": 20, "length": 19, "confidenceScore": 0.99}
                    ],
                    "redactedText": "********"
                }],
                "errors": [],
                "modelVersion": "latest"
            }
        }"#;

        let parsed: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let texts: Vec<String> = parsed
            .results
            .documents
            .into_iter()
            .flat_map(|d| d.entities)
            .map(|e| e.text)
            .collect();

        assert_eq!(texts, vec!["John Doe", "4532 1234 5678 9010"]);
    }
}
