use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Which PII detection provider to wire into the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorProvider {
    /// Azure Language Service PII entity recognition
    Azure,
    /// OpenAI chat-completions prompt
    OpenAi,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_upload_bytes: usize,
    pub document_intelligence_endpoint: String,
    pub document_intelligence_key: String,
    pub detector_provider: DetectorProvider,
    pub azure_language_endpoint: Option<String>,
    pub azure_language_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let detector_provider = match env::var("PII_DETECTION_PROVIDER")
            .unwrap_or_else(|_| "azure".to_string())
            .to_lowercase()
            .as_str()
        {
            "azure" => DetectorProvider::Azure,
            "openai" => DetectorProvider::OpenAi,
            other => bail!("PII_DETECTION_PROVIDER must be 'azure' or 'openai', got '{other}'"),
        };

        let config = Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (16 * 1024 * 1024).to_string())
                .parse()
                .context("MAX_UPLOAD_BYTES must be a valid number")?,
            document_intelligence_endpoint: env::var("AZURE_DOCUMENT_INTELLIGENCE_ENDPOINT")
                .context("AZURE_DOCUMENT_INTELLIGENCE_ENDPOINT must be set")?,
            document_intelligence_key: env::var("AZURE_DOCUMENT_INTELLIGENCE_KEY")
                .context("AZURE_DOCUMENT_INTELLIGENCE_KEY must be set")?,
            detector_provider,
            azure_language_endpoint: env::var("AZURE_LANGUAGE_ENDPOINT").ok(),
            azure_language_key: env::var("AZURE_LANGUAGE_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the selected provider has the credentials it needs.
    fn validate(&self) -> Result<()> {
        match self.detector_provider {
            DetectorProvider::Azure => {
                if self.azure_language_endpoint.is_none() || self.azure_language_key.is_none() {
                    bail!(
                        "AZURE_LANGUAGE_ENDPOINT and AZURE_LANGUAGE_KEY must be set \
                         when PII_DETECTION_PROVIDER=azure"
                    );
                }
            }
            DetectorProvider::OpenAi => {
                if self.openai_api_key.is_none() {
                    bail!("OPENAI_API_KEY must be set when PII_DETECTION_PROVIDER=openai");
                }
            }
        }
        Ok(())
    }
}
