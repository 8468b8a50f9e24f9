//! Provider bootstrap from environment configuration.
//!
//! `TABIBI_PROVIDER` selects the backend:
//!
//! - `mock` (default) for deterministic offline runs and tests
//! - `gemini-api` for real Gemini transport; requires
//!   `TABIBI_GEMINI_CONFIG_PATH` pointing at a readable UTF-8 JSON file:
//!
//! ```json
//! {
//!   "api_key": "<google-ai-studio-key>",
//!   "model": "gemini-2.5-flash",
//!   "timeout_sec": 120
//! }
//! ```
//!
//! Contract notes:
//! - `api_key` is required and must be non-empty after trimming.
//! - `model` is optional; the provider falls back to its default model.
//! - `timeout_sec` is optional and must be > 0 when provided.
//! - Unknown JSON fields are rejected.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chat_provider::ChatProvider;
use chat_provider_gemini_api::{GeminiApiProvider, GeminiProviderConfig, GEMINI_API_PROVIDER_ID};
use chat_provider_mock::{MockProvider, MOCK_PROVIDER_ID};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PROVIDER_ID: &str = MOCK_PROVIDER_ID;
pub const PROVIDER_ENV_VAR: &str = "TABIBI_PROVIDER";
pub const GEMINI_CONFIG_PATH_ENV_VAR: &str = "TABIBI_GEMINI_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ProviderConfigError {
    #[error("environment variable {var} must point at a Gemini config file")]
    MissingConfigPath { var: &'static str },

    #[error("failed to read Gemini config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse Gemini config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Gemini config at {path} must set a non-empty api_key")]
    MissingApiKey { path: PathBuf },

    #[error("Gemini config at {path} has timeout_sec = 0; omit it or use a positive value")]
    ZeroTimeout { path: PathBuf },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeminiConfigFile {
    api_key: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    timeout_sec: Option<u64>,
}

/// Constructs the provider selected by `TABIBI_PROVIDER`.
pub fn provider_from_env(instructions: &str) -> Result<Box<dyn ChatProvider>, String> {
    let provider_id = std::env::var(PROVIDER_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    provider_for_id(
        provider_id.as_deref().unwrap_or(DEFAULT_PROVIDER_ID),
        instructions,
    )
}

pub fn provider_for_id(
    provider_id: &str,
    instructions: &str,
) -> Result<Box<dyn ChatProvider>, String> {
    match provider_id {
        MOCK_PROVIDER_ID => Ok(Box::new(MockProvider::default())),
        GEMINI_API_PROVIDER_ID => {
            let path = gemini_config_path_from_env().map_err(|error| error.to_string())?;
            let config = load_gemini_config(&path).map_err(|error| error.to_string())?;
            let provider = GeminiApiProvider::new(provider_config(config, instructions))
                .map_err(|error| error.to_string())?;
            Ok(Box::new(provider))
        }
        unknown => Err(format!(
            "Unsupported provider '{unknown}'. Available providers: {MOCK_PROVIDER_ID}, {GEMINI_API_PROVIDER_ID}"
        )),
    }
}

fn gemini_config_path_from_env() -> Result<PathBuf, ProviderConfigError> {
    std::env::var(GEMINI_CONFIG_PATH_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(ProviderConfigError::MissingConfigPath {
            var: GEMINI_CONFIG_PATH_ENV_VAR,
        })
}

fn load_gemini_config(path: &Path) -> Result<GeminiConfigFile, ProviderConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ProviderConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = serde_json::from_str::<GeminiConfigFile>(&raw).map_err(|source| {
        ProviderConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if config.api_key.trim().is_empty() {
        return Err(ProviderConfigError::MissingApiKey {
            path: path.to_path_buf(),
        });
    }

    if config.timeout_sec == Some(0) {
        return Err(ProviderConfigError::ZeroTimeout {
            path: path.to_path_buf(),
        });
    }

    Ok(config)
}

fn provider_config(config: GeminiConfigFile, instructions: &str) -> GeminiProviderConfig {
    let mut provider_config = GeminiProviderConfig::new(config.api_key.trim(), instructions);

    if let Some(model) = config.model {
        provider_config = provider_config.with_model(model);
    }

    if let Some(timeout_sec) = config.timeout_sec {
        provider_config = provider_config.with_timeout(Duration::from_secs(timeout_sec));
    }

    provider_config
}
