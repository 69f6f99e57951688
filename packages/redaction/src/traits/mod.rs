//! Core trait abstractions for the redaction collaborators.
//!
//! Each external system the workflow depends on is modeled as a single
//! trait so implementations can be swapped at configuration time:
//!
//! - [`TextExtractor`] - OCR: image bytes in, text + word boxes out
//! - [`PiiDetector`] - PII recognition over extracted text
//! - [`Rasterizer`] - fill regions and re-encode the image

pub mod detector;
pub mod extractor;
pub mod rasterizer;

pub use detector::PiiDetector;
pub use extractor::TextExtractor;
pub use rasterizer::Rasterizer;
