//! Minimal provider-agnostic contract for one triage conversation backend.
//!
//! This crate intentionally defines only the conversation round-trip contract
//! shared by all backends. It excludes transport details, wire payloads, and
//! any knowledge of how replies are classified or rendered upstream.

use std::fmt;

/// Error returned while constructing/configuring a provider before any
/// conversation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The single failure kind a conversation round trip can surface.
///
/// Network errors, backend-side errors, and malformed responses all collapse
/// into this one condition; callers translate it into user-visible fallback
/// behavior and never inspect the message beyond diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    message: String,
}

impl BackendFailure {
    /// Creates a new backend failure with a diagnostic message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BackendFailure {}

impl From<String> for BackendFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for BackendFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Immutable metadata describing a conversation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub model_id: String,
}

/// Provider interface for one logical conversation.
///
/// A provider instance owns whatever continuity state its backend needs
/// (replayed history, a server-side handle) and is exclusive to a single
/// conversation: a fresh instance must be created per new conversation.
/// `send` suspends the caller for the full backend round trip; serialization
/// of calls is the caller's responsibility.
pub trait ChatProvider {
    /// Returns provider/model identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Submits one user utterance and returns the raw assistant reply.
    ///
    /// Callers guarantee `user_text` is non-empty after trimming; providers
    /// do not re-validate. On failure the provider's continuity state must be
    /// left exactly as it was before the call, and no retry is attempted.
    fn send(&mut self, user_text: &str) -> Result<String, BackendFailure>;
}

#[cfg(test)]
mod tests {
    use super::{BackendFailure, ChatProvider, ProviderInitError, ProviderProfile};

    struct MinimalProvider;

    impl ChatProvider for MinimalProvider {
        fn profile(&self) -> ProviderProfile {
            ProviderProfile {
                provider_id: "minimal".to_string(),
                model_id: "minimal-model".to_string(),
            }
        }

        fn send(&mut self, user_text: &str) -> Result<String, BackendFailure> {
            Ok(format!("echo: {user_text}"))
        }
    }

    #[test]
    fn provider_init_error_preserves_message() {
        let error = ProviderInitError::new("missing api key");
        assert_eq!(error.message(), "missing api key");
        assert_eq!(error.to_string(), "missing api key");
    }

    #[test]
    fn backend_failure_preserves_message() {
        let failure = BackendFailure::new("connection reset");
        assert_eq!(failure.message(), "connection reset");
        assert_eq!(failure.to_string(), "connection reset");
    }

    #[test]
    fn backend_failure_converts_from_strings() {
        assert_eq!(
            BackendFailure::from("boom"),
            BackendFailure::new("boom".to_string())
        );
        assert_eq!(
            BackendFailure::from("boom".to_string()),
            BackendFailure::new("boom")
        );
    }

    #[test]
    fn minimal_provider_round_trips_text() {
        let mut provider = MinimalProvider;

        let profile = provider.profile();
        assert_eq!(profile.provider_id, "minimal");
        assert_eq!(profile.model_id, "minimal-model");

        let reply = provider
            .send("hello")
            .expect("minimal provider should not fail");
        assert_eq!(reply, "echo: hello");
    }
}
