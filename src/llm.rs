//! Text generation through Ollama or the OpenAI chat API.

use async_openai::config::OpenAIConfig;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client as OpenAIClient;
use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use std::time::Duration;
use tokio::time::sleep;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::config::{ApiSettings, LlmProvider};
use crate::error::IntelError;
use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST};

const INITIAL_BACKOFF_SECS: u64 = 2;

/// An external service that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text, or the reason no text could be produced.
    ///
    /// `Configuration` means real generation cannot run with `settings`;
    /// `Fetch` means the service was unreachable or answered with nothing.
    async fn generate(&self, settings: &ApiSettings, prompt: &str) -> Result<String, IntelError>;
}

/// Builds the client and request parameters for a settings snapshot.
pub fn llm_params(settings: &ApiSettings) -> Result<LLMParams, IntelError> {
    settings.text_generation_ready()?;

    let llm_client = match settings.llm_provider {
        LlmProvider::Ollama => LLMClient::Ollama(Ollama::new(
            settings.ollama_host.clone(),
            settings.ollama_port,
        )),
        LlmProvider::OpenAI => {
            let api_key = settings.openai_api_key.as_deref().ok_or_else(|| {
                IntelError::Configuration("OPENAI_API_KEY is required for text generation".into())
            })?;
            let config = OpenAIConfig::new().with_api_key(api_key);
            LLMClient::OpenAI(OpenAIClient::with_config(config))
        }
    };

    Ok(LLMParams {
        llm_client,
        model: settings.text_model.clone(),
        temperature: settings.temperature,
    })
}

async fn request_once(prompt: &str, params: &LLMParams) -> Result<String, IntelError> {
    match &params.llm_client {
        LLMClient::Ollama(ollama) => {
            let mut request = GenerationRequest::new(params.model.clone(), prompt.to_string());
            request.options = Some(GenerationOptions::default().temperature(params.temperature));
            let response = ollama
                .generate(request)
                .await
                .map_err(|e| IntelError::Fetch(e.to_string()))?;
            Ok(response.response)
        }
        LLMClient::OpenAI(client) => {
            let message = ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| IntelError::Fetch(e.to_string()))?;
            let request = CreateChatCompletionRequestArgs::default()
                .model(params.model.as_str())
                .temperature(params.temperature)
                .messages([message.into()])
                .build()
                .map_err(|e| IntelError::Fetch(e.to_string()))?;
            let response = client
                .chat()
                .create(request)
                .await
                .map_err(|e| IntelError::Fetch(e.to_string()))?;
            Ok(response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default())
        }
    }
}

/// Sends `prompt`, retrying with exponential backoff. Each attempt is
/// bounded by `call_timeout`; an empty answer counts as a failed attempt.
pub async fn generate_llm_response(
    prompt: &str,
    params: &LLMParams,
    call_timeout: Duration,
    max_retries: usize,
) -> Result<String, IntelError> {
    let attempts = max_retries + 1;
    let mut backoff = INITIAL_BACKOFF_SECS;
    let mut last_error = IntelError::Fetch("no attempt was made".into());

    debug!(target: TARGET_LLM_REQUEST, "Starting LLM response generation with model {}", params.model);

    for attempt in 0..attempts {
        match timeout(call_timeout, request_once(prompt, params)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                debug!(target: TARGET_LLM_REQUEST, "LLM response received ({} chars)", text.len());
                return Ok(text);
            }
            Ok(Ok(_)) => {
                warn!(target: TARGET_LLM_REQUEST, "LLM returned an empty response");
                last_error = IntelError::Fetch("empty response".into());
            }
            Ok(Err(e)) => {
                warn!(target: TARGET_LLM_REQUEST, "Error generating response: {}", e);
                last_error = e;
            }
            Err(_) => {
                warn!(target: TARGET_LLM_REQUEST, "LLM request timed out after {}s", call_timeout.as_secs());
                last_error = IntelError::Fetch(format!(
                    "timed out after {}s",
                    call_timeout.as_secs()
                ));
            }
        }

        if attempt + 1 < attempts {
            info!(target: TARGET_LLM_REQUEST, "Retrying LLM request in {}s ({}/{})", backoff, attempt + 1, max_retries);
            sleep(Duration::from_secs(backoff)).await;
            backoff *= 2;
        }
    }

    error!(target: TARGET_LLM_REQUEST, "Failed to generate response after {} attempts: {}", attempts, last_error);
    Err(last_error)
}

/// [`TextGenerator`] backed by the provider named in the settings.
#[derive(Debug, Default, Clone)]
pub struct LlmTextGenerator;

#[async_trait]
impl TextGenerator for LlmTextGenerator {
    async fn generate(&self, settings: &ApiSettings, prompt: &str) -> Result<String, IntelError> {
        let params = llm_params(settings)?;
        generate_llm_response(
            prompt,
            &params,
            settings.generation_timeout,
            settings.max_generation_retries,
        )
        .await
    }
}
