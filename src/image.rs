//! Persona image generation with a deterministic placeholder.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize,
};
use async_openai::Client as OpenAIClient;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ApiSettings;
use crate::error::{IntelError, Mode, Outcome};
use crate::prompt::persona_image_prompt;
use crate::TARGET_LLM_REQUEST;

/// 1x1 transparent PNG.
pub const PLACEHOLDER_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub fn placeholder_data_uri() -> String {
    png_data_uri(PLACEHOLDER_PNG_BASE64)
}

fn png_data_uri(encoded: &str) -> String {
    format!("data:image/png;base64,{}", encoded)
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedImage {
    Url(String),
    Bytes(Vec<u8>),
}

impl GeneratedImage {
    /// The image as something a browser can load: the URL itself, or a PNG data URI.
    pub fn into_uri(self) -> String {
        match self {
            GeneratedImage::Url(url) => url,
            GeneratedImage::Bytes(bytes) => png_data_uri(&BASE64.encode(bytes)),
        }
    }
}

/// An external service that renders a prompt into an image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        settings: &ApiSettings,
        prompt: &str,
    ) -> Result<GeneratedImage, IntelError>;
}

/// [`ImageGenerator`] backed by the OpenAI images API.
#[derive(Debug, Default, Clone)]
pub struct OpenAiImageGenerator;

fn image_model(name: &str) -> ImageModel {
    match name {
        "dall-e-2" => ImageModel::DallE2,
        "dall-e-3" => ImageModel::DallE3,
        other => ImageModel::Other(other.to_string()),
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate_image(
        &self,
        settings: &ApiSettings,
        prompt: &str,
    ) -> Result<GeneratedImage, IntelError> {
        settings.image_generation_ready()?;
        let api_key = settings.openai_api_key.as_deref().ok_or_else(|| {
            IntelError::Configuration("OPENAI_API_KEY is required for image generation".into())
        })?;
        let client = OpenAIClient::with_config(OpenAIConfig::new().with_api_key(api_key));

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(image_model(&settings.image_model))
            .n(1)
            .size(ImageSize::S1024x1024)
            .response_format(ImageResponseFormat::Url)
            .build()
            .map_err(|e| IntelError::Fetch(e.to_string()))?;

        debug!(target: TARGET_LLM_REQUEST, "Requesting image from {}", settings.image_model);
        let response = timeout(settings.generation_timeout, client.images().create(request))
            .await
            .map_err(|_| {
                IntelError::Fetch(format!(
                    "image request timed out after {}s",
                    settings.generation_timeout.as_secs()
                ))
            })?
            .map_err(|e| IntelError::Fetch(e.to_string()))?;

        let image = response
            .data
            .first()
            .ok_or_else(|| IntelError::Fetch("image service returned no images".into()))?;

        match image.as_ref() {
            Image::Url { url, .. } => Ok(GeneratedImage::Url(url.clone())),
            Image::B64Json { b64_json, .. } => BASE64
                .decode(b64_json.as_bytes())
                .map(GeneratedImage::Bytes)
                .map_err(|e| IntelError::Parse(format!("invalid base64 image: {}", e))),
        }
    }
}

/// Produces the persona image URL for a report.
pub struct ImageDescriptor {
    generator: Arc<dyn ImageGenerator>,
}

impl ImageDescriptor {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Mock mode returns the placeholder. Real mode asks the generator and
    /// falls back to the placeholder on any recoverable failure.
    pub async fn describe(
        &self,
        settings: &ApiSettings,
        age_bracket: &str,
        location: &str,
        interests: &[String],
        keywords: &[String],
    ) -> Result<Outcome<String>, IntelError> {
        if !settings.use_real_apis {
            return Ok(Outcome::primary(placeholder_data_uri(), Mode::Mock));
        }
        if let Err(cause) = settings.image_generation_ready() {
            warn!(target: TARGET_LLM_REQUEST, "Image generation not configured, using placeholder: {}", cause);
            return Ok(Outcome::recovered(placeholder_data_uri(), Mode::Mock, cause));
        }

        let prompt = persona_image_prompt(age_bracket, location, interests, keywords);
        match self.generator.generate_image(settings, &prompt).await {
            Ok(image) => {
                info!(target: TARGET_LLM_REQUEST, "Persona image generated");
                Ok(Outcome::primary(image.into_uri(), Mode::Real))
            }
            Err(cause) if cause.is_recoverable() => {
                warn!(target: TARGET_LLM_REQUEST, "Image generation failed, using placeholder: {}", cause);
                Ok(Outcome::recovered(placeholder_data_uri(), Mode::Mock, cause))
            }
            Err(fatal) => Err(fatal),
        }
    }
}
