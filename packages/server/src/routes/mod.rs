//! HTTP route handlers.

pub mod health;
pub mod redact;

pub use health::health_handler;
pub use redact::redact_handler;
