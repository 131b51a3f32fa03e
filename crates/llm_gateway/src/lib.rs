//! Stateless relay to an OpenAI-compatible chat completion endpoint.
//!
//! One request in, one reply out. The gateway holds no conversation
//! state, performs no retries, and never injects messages of its own;
//! callers assemble the full sequence (system prompt included) before
//! handing it over.

pub mod client;
pub mod error;
pub mod models;

pub use client::{LlmClient, DEFAULT_BASE_URL};
pub use error::GatewayError;
pub use models::ApiMessage;
