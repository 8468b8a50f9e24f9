//! Gemini API-backed implementation of the shared `chat_provider` contract.
//!
//! This adapter owns the conversation-continuity state the stateless
//! `generateContent` endpoint requires: the full wire history is replayed on
//! every turn and committed only after a successful round trip.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chat_provider::{BackendFailure, ChatProvider, ProviderInitError, ProviderProfile};
use gemini_api::config::DEFAULT_GEMINI_MODEL;
use gemini_api::{Content, GeminiApiClient, GeminiApiConfig, GeminiApiError, GenerateContentRequest};

/// Stable provider identifier used for explicit startup selection.
pub const GEMINI_API_PROVIDER_ID: &str = "gemini-api";

/// Runtime configuration for the Gemini API provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiProviderConfig {
    pub api_key: String,
    /// Persona/system instructions fixed for the provider's lifetime.
    pub instructions: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl GeminiProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            instructions: instructions.into(),
            model: None,
            base_url: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_gemini_api_config(self, model: &str) -> GeminiApiConfig {
        let mut config = GeminiApiConfig::new(self.api_key).with_model(model);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait GenerateClient: Send + Sync {
    fn generate_text(&self, request: &GenerateContentRequest) -> Result<String, GeminiApiError>;
}

#[derive(Debug)]
struct DefaultGenerateClient {
    client: GeminiApiClient,
}

impl GenerateClient for DefaultGenerateClient {
    fn generate_text(&self, request: &GenerateContentRequest) -> Result<String, GeminiApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                GeminiApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.generate_text(request))
    }
}

/// `ChatProvider` adapter backed by `gemini_api` transport primitives.
pub struct GeminiApiProvider {
    model_id: String,
    instructions: String,
    history: Mutex<Vec<Content>>,
    generate_client: Arc<dyn GenerateClient>,
}

impl GeminiApiProvider {
    /// Creates a provider using real Gemini API transport.
    pub fn new(config: GeminiProviderConfig) -> Result<Self, ProviderInitError> {
        let model_id = sanitize_model_id(config.model.clone());
        let instructions = config.instructions.clone();
        let generate_client = Arc::new(DefaultGenerateClient {
            client: GeminiApiClient::new(config.into_gemini_api_config(&model_id))
                .map_err(map_init_error)?,
        });

        Ok(Self {
            model_id,
            instructions,
            history: Mutex::new(Vec::new()),
            generate_client,
        })
    }

    fn request_with_pending_user_text(&self, user_text: &str) -> GenerateContentRequest {
        let mut contents = lock_unpoisoned(&self.history).clone();
        contents.push(Content::user(user_text));
        GenerateContentRequest::new(contents, Some(self.instructions.clone()))
    }

    fn commit_round_trip(&self, user_text: &str, assistant_text: &str) {
        let mut history = lock_unpoisoned(&self.history);
        history.push(Content::user(user_text));
        history.push(Content::model(assistant_text));
    }

    #[cfg(test)]
    fn with_generate_client_for_tests(
        model_id: Option<String>,
        instructions: impl Into<String>,
        generate_client: Arc<dyn GenerateClient>,
    ) -> Self {
        Self {
            model_id: sanitize_model_id(model_id),
            instructions: instructions.into(),
            history: Mutex::new(Vec::new()),
            generate_client,
        }
    }

    #[cfg(test)]
    fn history_snapshot(&self) -> Vec<Content> {
        lock_unpoisoned(&self.history).clone()
    }
}

impl ChatProvider for GeminiApiProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: GEMINI_API_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn send(&mut self, user_text: &str) -> Result<String, BackendFailure> {
        let request = self.request_with_pending_user_text(user_text);

        match self.generate_client.generate_text(&request) {
            Ok(assistant_text) => {
                self.commit_round_trip(user_text, &assistant_text);
                Ok(assistant_text)
            }
            Err(error) => Err(BackendFailure::new(format!(
                "Gemini API request failed: {error}"
            ))),
        }
    }
}

fn sanitize_model_id(model_id: Option<String>) -> String {
    model_id
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
}

fn map_init_error(error: GeminiApiError) -> ProviderInitError {
    ProviderInitError::new(format!("Failed to initialize gemini-api provider: {error}"))
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
