//! API mode and credential settings.
//!
//! `ApiSettings` is an immutable value. `SharedSettings` holds the current
//! value for the whole process; requests take one snapshot up front and use
//! it for every sub-step, so an administrative update never splits a single
//! request between real and mock decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use tokio::time::Duration;
use tracing::info;

use crate::environment::{get_env_flag, get_env_var_or};
use crate::error::IntelError;
use crate::TARGET_PIPELINE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAI,
    Ollama,
}

impl From<&str> for LlmProvider {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ollama" => LlmProvider::Ollama,
            _ => LlmProvider::OpenAI,
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAI => write!(f, "openai"),
            LlmProvider::Ollama => write!(f, "ollama"),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct ApiSettings {
    pub use_real_apis: bool,
    pub llm_provider: LlmProvider,
    pub openai_api_key: Option<String>,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
    pub feed_timeout: Duration,
    pub generation_timeout: Duration,
    pub max_generation_retries: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            use_real_apis: false,
            llm_provider: LlmProvider::OpenAI,
            openai_api_key: None,
            ollama_host: "http://localhost".to_string(),
            ollama_port: 11434,
            text_model: "gpt-4o-mini".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.7,
            feed_timeout: Duration::from_secs(10),
            generation_timeout: Duration::from_secs(60),
            max_generation_retries: 2,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("use_real_apis", &self.use_real_apis)
            .field("llm_provider", &self.llm_provider)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("ollama_host", &self.ollama_host)
            .field("ollama_port", &self.ollama_port)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("temperature", &self.temperature)
            .field("feed_timeout", &self.feed_timeout)
            .field("generation_timeout", &self.generation_timeout)
            .field("max_generation_retries", &self.max_generation_retries)
            .finish()
    }
}

impl ApiSettings {
    /// Builds settings from environment variables, defaulting anything unset.
    pub fn from_env() -> Self {
        let defaults = ApiSettings::default();
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            use_real_apis: get_env_flag("USE_REAL_APIS"),
            llm_provider: std::env::var("LLM_PROVIDER")
                .map(|p| LlmProvider::from(p.as_str()))
                .unwrap_or(defaults.llm_provider),
            openai_api_key,
            ollama_host: std::env::var("OLLAMA_HOST").unwrap_or(defaults.ollama_host),
            ollama_port: get_env_var_or("OLLAMA_PORT", defaults.ollama_port),
            text_model: std::env::var("TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: std::env::var("IMAGE_MODEL").unwrap_or(defaults.image_model),
            temperature: get_env_var_or("LLM_TEMPERATURE", defaults.temperature),
            feed_timeout: Duration::from_secs(get_env_var_or("FEED_TIMEOUT_SECS", 10)),
            generation_timeout: Duration::from_secs(get_env_var_or(
                "GENERATION_TIMEOUT_SECS",
                60,
            )),
            max_generation_retries: get_env_var_or(
                "MAX_GENERATION_RETRIES",
                defaults.max_generation_retries,
            ),
        }
    }

    /// Checks that real text generation can run with these settings.
    pub fn text_generation_ready(&self) -> Result<(), IntelError> {
        if !self.use_real_apis {
            return Err(IntelError::Configuration("real APIs are disabled".into()));
        }
        match self.llm_provider {
            LlmProvider::OpenAI if self.openai_api_key.is_none() => Err(
                IntelError::Configuration("OPENAI_API_KEY is required for text generation".into()),
            ),
            LlmProvider::Ollama if self.ollama_host.trim().is_empty() => Err(
                IntelError::Configuration("OLLAMA_HOST is required for text generation".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Checks that real image generation can run with these settings.
    pub fn image_generation_ready(&self) -> Result<(), IntelError> {
        if !self.use_real_apis {
            return Err(IntelError::Configuration("real APIs are disabled".into()));
        }
        if self.openai_api_key.is_none() {
            return Err(IntelError::Configuration(
                "OPENAI_API_KEY is required for image generation".into(),
            ));
        }
        Ok(())
    }

    pub fn status(&self) -> ApiStatus {
        ApiStatus {
            use_real_apis: self.use_real_apis,
            provider: self.llm_provider,
            text_generation_configured: self.text_generation_ready().is_ok(),
            image_generation_configured: self.image_generation_ready().is_ok(),
        }
    }
}

/// Partial update applied by an administrative operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub use_real_apis: Option<bool>,
    pub llm_provider: Option<LlmProvider>,
    pub openai_api_key: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiStatus {
    pub use_real_apis: bool,
    pub provider: LlmProvider,
    pub text_generation_configured: bool,
    pub image_generation_configured: bool,
}

/// Process-wide holder of the current settings.
#[derive(Clone, Debug)]
pub struct SharedSettings {
    current: Arc<RwLock<Arc<ApiSettings>>>,
}

impl SharedSettings {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// One consistent view of the settings for the duration of a request.
    pub fn snapshot(&self) -> Arc<ApiSettings> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn update(&self, update: SettingsUpdate) -> ApiStatus {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let mut next = (**guard).clone();

        if let Some(use_real_apis) = update.use_real_apis {
            next.use_real_apis = use_real_apis;
        }
        if let Some(provider) = update.llm_provider {
            next.llm_provider = provider;
        }
        if let Some(key) = update.openai_api_key {
            next.openai_api_key = Some(key).filter(|k| !k.trim().is_empty());
        }
        if let Some(model) = update.text_model {
            next.text_model = model;
        }
        if let Some(model) = update.image_model {
            next.image_model = model;
        }

        let status = next.status();
        *guard = Arc::new(next);
        info!(target: TARGET_PIPELINE, "API settings updated: {:?}", status);
        status
    }

    /// Flips between real and mock mode, returning the new status.
    pub fn toggle_mode(&self) -> ApiStatus {
        let current = self.snapshot().use_real_apis;
        self.update(SettingsUpdate {
            use_real_apis: Some(!current),
            ..Default::default()
        })
    }

    pub fn status(&self) -> ApiStatus {
        self.snapshot().status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_mode_requires_credentials() {
        let settings = ApiSettings {
            use_real_apis: true,
            ..Default::default()
        };
        assert!(matches!(
            settings.text_generation_ready(),
            Err(IntelError::Configuration(_))
        ));
        assert!(matches!(
            settings.image_generation_ready(),
            Err(IntelError::Configuration(_))
        ));

        let ollama = ApiSettings {
            use_real_apis: true,
            llm_provider: LlmProvider::Ollama,
            ..Default::default()
        };
        assert!(ollama.text_generation_ready().is_ok());
        assert!(ollama.image_generation_ready().is_err());
    }

    #[test]
    fn test_snapshot_is_stable_across_updates() {
        let shared = SharedSettings::new(ApiSettings::default());
        let before = shared.snapshot();

        let status = shared.update(SettingsUpdate {
            use_real_apis: Some(true),
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        });

        assert!(!before.use_real_apis);
        assert!(before.openai_api_key.is_none());
        assert!(status.use_real_apis);
        assert!(status.text_generation_configured);
        assert!(shared.snapshot().use_real_apis);
    }

    #[test]
    fn test_toggle_mode() {
        let shared = SharedSettings::new(ApiSettings::default());
        assert!(shared.toggle_mode().use_real_apis);
        assert!(!shared.toggle_mode().use_real_apis);
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = ApiSettings {
            openai_api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
