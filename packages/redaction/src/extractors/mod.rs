//! OCR (text extraction) provider implementations.

pub mod azure;

pub use azure::AzureReadExtractor;
