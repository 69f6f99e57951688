//! Domain types shared across the redaction workflow.

pub mod geometry;
pub mod word;

pub use geometry::BoundingBox;
pub use word::{ExtractedText, RedactedImage, WordToken};
