//! OCR trait: extract text and word positions from image bytes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ExtractedText;

/// Text extraction (OCR) collaborator.
///
/// Implementations wrap a specific OCR provider and return the full text of
/// the image plus word tokens in reading order, each with an axis-aligned
/// bounding box and a confidence score.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text and word-level bounding boxes from an image.
    async fn extract(&self, image: &[u8]) -> Result<ExtractedText>;

    /// Name of this extractor (for logging).
    fn name(&self) -> &str;
}
