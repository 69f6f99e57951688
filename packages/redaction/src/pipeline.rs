//! The redaction workflow: extract text, detect PII, map to regions, draw.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::mapper::map_pii_regions;
use crate::traits::{PiiDetector, Rasterizer, TextExtractor};
use crate::types::RedactedImage;

/// Orchestrates the full image redaction workflow.
///
/// Holds its collaborators behind trait objects so implementations are a
/// configuration-time choice. The pipeline itself is stateless: it can be
/// shared across concurrent requests without locking.
#[derive(Clone)]
pub struct RedactionPipeline {
    extractor: Arc<dyn TextExtractor>,
    detector: Arc<dyn PiiDetector>,
    rasterizer: Arc<dyn Rasterizer>,
}

impl RedactionPipeline {
    /// Assemble a pipeline from its three collaborators.
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        detector: Arc<dyn PiiDetector>,
        rasterizer: Arc<dyn Rasterizer>,
    ) -> Self {
        Self {
            extractor,
            detector,
            rasterizer,
        }
    }

    /// Redact PII from an image.
    ///
    /// Steps:
    /// 1. Extract text and word locations from the image
    /// 2. Detect PII entities in the extracted text
    /// 3. Map PII entities to word bounding boxes
    /// 4. Draw filled rectangles over the matched regions
    ///
    /// When the image contains no text, the detector is not called. The
    /// rasterizer always runs, so the output encoding is uniform even when
    /// nothing was redacted.
    pub async fn redact(&self, image: &[u8]) -> Result<RedactedImage> {
        info!(bytes = image.len(), extractor = self.extractor.name(), "starting redaction workflow");

        let extracted = self.extractor.extract(image).await?;
        info!(
            chars = extracted.content.len(),
            words = extracted.words.len(),
            "text extracted"
        );

        let pii_values = if extracted.is_empty() {
            info!("no text found, skipping PII detection");
            Vec::new()
        } else {
            let values = self.detector.detect(&extracted.content).await?;
            info!(detector = self.detector.name(), count = values.len(), "PII detection completed");
            values
        };

        let regions = map_pii_regions(&extracted.words, &pii_values);
        info!(regions = regions.len(), "mapped PII to redaction regions");

        let redacted = self.rasterizer.redact(image, &regions)?;
        info!(
            bytes = redacted.content.len(),
            content_type = redacted.content_type,
            "redaction workflow completed"
        );

        Ok(redacted)
    }
}
