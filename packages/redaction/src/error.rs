//! Typed errors for the redaction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during the redaction workflow.
#[derive(Debug, Error)]
pub enum RedactionError {
    /// OCR provider unavailable or failed
    #[error("OCR error: {0}")]
    Ocr(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// PII detection provider unavailable or failed
    #[error("PII detection error: {0}")]
    Detection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned a non-success HTTP status
    #[error("provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    /// Image decode or encode failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Geometry from the OCR provider was malformed
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// OCR analysis did not finish within the polling budget
    #[error("OCR analysis timed out after {waited_ms}ms")]
    OcrTimeout { waited_ms: u64 },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl RedactionError {
    /// Wrap a provider transport error as an OCR failure.
    pub fn ocr(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Ocr(Box::new(err))
    }

    /// Wrap a provider transport error as a detection failure.
    pub fn detection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Detection(Box::new(err))
    }
}

/// Result type alias for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;
