//! PII detection provider implementations.
//!
//! Two implementations of [`crate::traits::PiiDetector`]:
//!
//! - [`AzureLanguageDetector`] - Azure Language Service PII entity
//!   recognition (the cloud NLP path)
//! - [`OpenAiDetector`] - LLM-prompt-based detection via the OpenAI chat
//!   completions API
//!
//! Which one a deployment uses is a configuration-time choice made by the
//! caller that assembles the pipeline.

pub mod azure;
pub mod openai;

pub use azure::AzureLanguageDetector;
pub use openai::OpenAiDetector;
