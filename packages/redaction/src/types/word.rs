//! Word tokens and extraction/rasterization results.

use serde::{Deserialize, Serialize};

use crate::types::geometry::BoundingBox;

/// A single word extracted from an image by the OCR collaborator.
///
/// Words arrive in reading order (top-to-bottom, left-to-right within a
/// line); that ordering is load-bearing for multi-word PII matching and is
/// carried by `Vec` position in [`ExtractedText`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    /// Text content of the word
    pub text: String,

    /// Position of the word in the source image
    pub bounding_box: BoundingBox,

    /// OCR confidence in `[0, 1]`. Carried through but never used as a
    /// redaction threshold: under-redaction is the worse failure mode.
    pub confidence: f32,
}

impl WordToken {
    /// Create a word token with full confidence.
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence: 1.0,
        }
    }

    /// Set the OCR confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Output of the OCR collaborator: full text plus positioned word tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Full extracted text, as reported by the provider
    pub content: String,

    /// Word tokens in reading order
    pub words: Vec<WordToken>,
}

impl ExtractedText {
    /// Create an extraction result.
    pub fn new(content: impl Into<String>, words: Vec<WordToken>) -> Self {
        Self {
            content: content.into(),
            words,
        }
    }

    /// True when no text was found in the image.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.words.is_empty()
    }
}

/// A re-encoded image produced by the rasterizer.
#[derive(Debug, Clone)]
pub struct RedactedImage {
    /// Encoded image bytes
    pub content: Vec<u8>,

    /// MIME type of the encoding (e.g. `image/png`)
    pub content_type: &'static str,
}
