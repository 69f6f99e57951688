//! Azure Document Intelligence OCR provider.
//!
//! Uses the `prebuilt-read` model: submit the image bytes, then poll the
//! returned operation until analysis succeeds. Word polygons are collapsed
//! to axis-aligned bounding boxes.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{RedactionError, Result};
use crate::traits::TextExtractor;
use crate::types::{BoundingBox, ExtractedText, WordToken};

const API_VERSION: &str = "2024-11-30";

/// OCR via Azure Document Intelligence's `prebuilt-read` model.
#[derive(Clone)]
pub struct AzureReadExtractor {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl AzureReadExtractor {
    /// Create a new extractor for the given Document Intelligence endpoint.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            key: key.into(),
            poll_interval: Duration::from_millis(500),
            poll_timeout: Duration::from_secs(60),
        }
    }

    /// Set the delay between status polls (default: 500ms).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the overall polling budget (default: 60s).
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Submit the image for analysis; returns the operation URL to poll.
    async fn begin_analyze(&self, image: &[u8]) -> Result<String> {
        let url = format!(
            "{}/documentintelligence/documentModels/prebuilt-read:analyze?api-version={}",
            self.endpoint, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(RedactionError::ocr)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RedactionError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| RedactionError::Provider {
                status: status.as_u16(),
                message: "missing Operation-Location header".to_string(),
            })
    }

    /// Poll the operation until it completes or the budget runs out.
    async fn poll_result(&self, operation_url: &str) -> Result<AnalyzeResult> {
        let started = std::time::Instant::now();

        loop {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .client
                .get(operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.key)
                .send()
                .await
                .map_err(RedactionError::ocr)?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(RedactionError::Provider {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: OperationStatus = response.json().await.map_err(RedactionError::ocr)?;

            match body.status.as_str() {
                "succeeded" => {
                    return body.analyze_result.ok_or_else(|| RedactionError::Provider {
                        status: status.as_u16(),
                        message: "succeeded operation carried no analyzeResult".to_string(),
                    });
                }
                "failed" => {
                    return Err(RedactionError::Provider {
                        status: status.as_u16(),
                        message: format!("analysis failed: {:?}", body.error),
                    });
                }
                other => {
                    debug!(status = other, "analysis still in progress");
                }
            }

            if started.elapsed() > self.poll_timeout {
                return Err(RedactionError::OcrTimeout {
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }
        }
    }
}

#[derive(Deserialize)]
struct OperationStatus {
    status: String,
    #[serde(rename = "analyzeResult")]
    analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct AnalyzeResult {
    #[serde(default)]
    content: String,
    #[serde(default)]
    pages: Vec<AnalyzePage>,
}

#[derive(Deserialize)]
struct AnalyzePage {
    #[serde(default)]
    words: Vec<AnalyzeWord>,
}

#[derive(Deserialize)]
struct AnalyzeWord {
    content: String,
    #[serde(default)]
    polygon: Vec<f32>,
    #[serde(default = "default_confidence")]
    confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

/// Convert the provider result into the domain shape, preserving the
/// provider's reading order.
fn into_extracted_text(result: AnalyzeResult) -> Result<ExtractedText> {
    let mut words = Vec::new();

    for page in result.pages {
        for word in page.words {
            let bounding_box = BoundingBox::from_polygon(&word.polygon)?;
            words.push(WordToken::new(word.content, bounding_box).with_confidence(word.confidence));
        }
    }

    Ok(ExtractedText::new(result.content, words))
}

#[async_trait]
impl TextExtractor for AzureReadExtractor {
    async fn extract(&self, image: &[u8]) -> Result<ExtractedText> {
        info!(bytes = image.len(), "submitting image for OCR analysis");

        let operation_url = self.begin_analyze(image).await?;
        let result = self.poll_result(&operation_url).await?;
        let extracted = into_extracted_text(result)?;

        info!(
            chars = extracted.content.len(),
            words = extracted.words.len(),
            "OCR analysis completed"
        );
        Ok(extracted)
    }

    fn name(&self) -> &str {
        "azure-document-intelligence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_result_parsing() {
        let json = r#"{
            "status": "succeeded",
            "analyzeResult": {
                "content": "John Doe\n4532",
                "pages": [{
                    "pageNumber": 1,
                    "words": [
                        {"content": "John", "polygon": [1.0, 1.0, 3.0, 1.0, 3.0, 2.0, 1.0, 2.0], "confidence": 0.98},
                        {"content": "Doe", "polygon": [4.0, 1.0, 6.0, 1.0, 6.0, 2.0, 4.0, 2.0], "confidence": 0.97},
                        {"content": "4532", "polygon": [1.0, 3.0, 3.0, 3.0, 3.0, 4.0, 1.0, 4.0], "confidence": 0.95}
                    ]
                }]
            }
        }"#;

        let parsed: OperationStatus = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "succeeded");

        let extracted = into_extracted_text(parsed.analyze_result.unwrap()).unwrap();
        assert_eq!(extracted.content, "John Doe\n4532");
        assert_eq!(extracted.words.len(), 3);
        assert_eq!(extracted.words[0].text, "John");
        assert_eq!(extracted.words[0].bounding_box, BoundingBox::new(1.0, 1.0, 2.0, 1.0));
        assert_eq!(extracted.words[0].confidence, 0.98);
    }

    #[test]
    fn test_running_status_has_no_result() {
        let parsed: OperationStatus =
            serde_json::from_str(r#"{"status": "running"}"#).unwrap();
        assert_eq!(parsed.status, "running");
        assert!(parsed.analyze_result.is_none());
    }

    #[test]
    fn test_malformed_polygon_is_an_error() {
        let result = AnalyzeResult {
            content: "x".to_string(),
            pages: vec![AnalyzePage {
                words: vec![AnalyzeWord {
                    content: "x".to_string(),
                    polygon: vec![1.0, 2.0],
                    confidence: 1.0,
                }],
            }],
        };

        assert!(into_extracted_text(result).is_err());
    }
}
