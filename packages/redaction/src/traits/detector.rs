//! PII detection trait.

use async_trait::async_trait;

use crate::error::Result;

/// PII detection collaborator.
///
/// Implementations wrap a provider (cloud NLP service, LLM prompt, ...) and
/// return the substrings of `text` flagged as PII. The provider is treated
/// as an opaque oracle: values may be multi-word ("John Doe") and may not
/// line up with OCR word boundaries; the mapper handles that.
///
/// Selection between implementations is a configuration-time choice made by
/// the caller that builds the pipeline.
#[async_trait]
pub trait PiiDetector: Send + Sync {
    /// Detect PII entities in the given text.
    ///
    /// Returns the flagged substrings in provider order. An empty result
    /// means no PII was found; it is not an error.
    async fn detect(&self, text: &str) -> Result<Vec<String>>;

    /// Name of this detector (for logging).
    fn name(&self) -> &str;
}
