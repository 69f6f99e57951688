//! HTTP API for image PII redaction.
//!
//! Thin axum surface over the `redaction` library: one upload endpoint and
//! a health check. Configuration comes from environment variables; the
//! pipeline and its collaborators are constructed once at process start.

pub mod app;
pub mod config;
pub mod routes;

pub use app::{build_app, build_pipeline, create_detector, AppState};
pub use config::{Config, DetectorProvider};
