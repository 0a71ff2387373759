//! OpenAI-backed LLM service.
//!
//! Public API:
//! - [`OpenAiService`]: non-streaming chat completions and single-input embeddings.
//! - [`config::OpenAiConfig`]: strongly typed per-profile configuration.
//! - [`error_handler`]: unified error type plus env helpers used at startup.
//! - [`health_service`]: best-effort endpoint probe suitable for a `/health` route.

pub mod config;
pub mod error_handler;
pub mod health_service;
mod open_ai_service;

pub use open_ai_service::OpenAiService;
