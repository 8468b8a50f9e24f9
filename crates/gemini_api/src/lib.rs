//! Transport-only Gemini API client primitives.
//!
//! This crate owns request/response building/parsing behavior for the
//! `generateContent` endpoint only. It intentionally contains no conversation
//! state, no persona text, and no runtime UI coupling.
//!
//! Requests are single-shot: no retry, no backoff, no streaming. Callers get
//! exactly one awaitable round trip that either yields the response payload
//! or fails with a typed [`GeminiApiError`].

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::GeminiApiClient;
pub use config::GeminiApiConfig;
pub use error::GeminiApiError;
pub use payload::{Content, GenerateContentRequest, GenerateContentResponse, Part};
pub use url::normalize_generate_content_url;
