//! Testing utilities including mock collaborators.
//!
//! These let applications test pipeline and handler logic without real OCR,
//! LLM, or imaging work.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{RedactionError, Result};
use crate::traits::{PiiDetector, Rasterizer, TextExtractor};
use crate::types::{BoundingBox, ExtractedText, RedactedImage};

/// A mock OCR extractor returning a predefined result.
#[derive(Default)]
pub struct MockExtractor {
    result: RwLock<ExtractedText>,
    fail: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction result returned by every call.
    pub fn with_result(self, result: ExtractedText) -> Self {
        *self.result.write().unwrap() = result;
        self
    }

    /// Make every call fail with the given message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.fail.write().unwrap() = Some(message.into());
        self
    }

    /// Number of times `extract` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract(&self, _image: &[u8]) -> Result<ExtractedText> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail.read().unwrap().clone() {
            return Err(RedactionError::Config(message));
        }
        Ok(self.result.read().unwrap().clone())
    }

    fn name(&self) -> &str {
        "mock-extractor"
    }
}

/// A mock PII detector returning a predefined list of values.
#[derive(Default)]
pub struct MockDetector {
    values: RwLock<Vec<String>>,
    fail: RwLock<Option<String>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PII values returned by every call.
    pub fn with_values(self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        *self.values.write().unwrap() = values.into_iter().map(Into::into).collect();
        self
    }

    /// Make every call fail with the given message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.fail.write().unwrap() = Some(message.into());
        self
    }

    /// The texts `detect` was called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PiiDetector for MockDetector {
    async fn detect(&self, text: &str) -> Result<Vec<String>> {
        self.calls.write().unwrap().push(text.to_string());
        if let Some(message) = self.fail.read().unwrap().clone() {
            return Err(RedactionError::Config(message));
        }
        Ok(self.values.read().unwrap().clone())
    }

    fn name(&self) -> &str {
        "mock-detector"
    }
}

/// A mock rasterizer that records the regions it was asked to fill and
/// echoes the source bytes back.
#[derive(Default)]
pub struct MockRasterizer {
    regions_seen: RwLock<Vec<Vec<BoundingBox>>>,
}

impl MockRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region lists passed to `redact`, one entry per call.
    pub fn regions_seen(&self) -> Vec<Vec<BoundingBox>> {
        self.regions_seen.read().unwrap().clone()
    }
}

impl Rasterizer for MockRasterizer {
    fn redact(&self, image: &[u8], regions: &[BoundingBox]) -> Result<RedactedImage> {
        self.regions_seen.write().unwrap().push(regions.to_vec());
        Ok(RedactedImage {
            content: image.to_vec(),
            content_type: "image/png",
        })
    }

    fn name(&self) -> &str {
        "mock-rasterizer"
    }
}
