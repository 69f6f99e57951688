//! Image PII Redaction Library
//!
//! Detects and redacts personally identifiable information (PII) in images
//! by chaining three collaborators: OCR (text + word bounding boxes), PII
//! entity recognition over the extracted text, and a rasterizer that blacks
//! out the matched regions and re-encodes the image.
//!
//! The load-bearing piece is [`mapper::map_pii_regions`], which maps PII
//! strings (possibly multi-word, possibly tokenized differently than the
//! OCR output) onto word-level bounding boxes. Everything else wraps a
//! cloud API or the `image` crate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use redaction::{
//!     AzureLanguageDetector, AzureReadExtractor, PngRasterizer, RedactionPipeline,
//! };
//!
//! let pipeline = RedactionPipeline::new(
//!     Arc::new(AzureReadExtractor::new(ocr_endpoint, ocr_key)),
//!     Arc::new(AzureLanguageDetector::new(language_endpoint, language_key)),
//!     Arc::new(PngRasterizer::new()),
//! );
//!
//! let redacted = pipeline.redact(&image_bytes).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (TextExtractor, PiiDetector, Rasterizer)
//! - [`types`] - Domain types (BoundingBox, WordToken, ExtractedText)
//! - [`mapper`] - PII-to-region mapping
//! - [`extractors`] - OCR implementations (Azure Document Intelligence)
//! - [`providers`] - PII detection implementations (Azure Language, OpenAI)
//! - [`raster`] - PNG rasterizer
//! - [`pipeline`] - Workflow orchestration
//! - [`testing`] - Mock collaborators for tests

pub mod error;
pub mod extractors;
pub mod mapper;
pub mod pipeline;
pub mod providers;
pub mod raster;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{RedactionError, Result};
pub use extractors::AzureReadExtractor;
pub use mapper::map_pii_regions;
pub use pipeline::RedactionPipeline;
pub use providers::{AzureLanguageDetector, OpenAiDetector};
pub use raster::PngRasterizer;
pub use traits::{PiiDetector, Rasterizer, TextExtractor};
pub use types::{BoundingBox, ExtractedText, RedactedImage, WordToken};
