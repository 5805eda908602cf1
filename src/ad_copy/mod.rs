//! Platform ad copy, templated or generated.

pub mod mock;
pub mod palette;
pub mod parser;
pub mod types;

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ApiSettings;
use crate::error::{IntelError, Mode, Outcome};
use crate::llm::TextGenerator;
use crate::news::NewsInsights;
use crate::persona::PersonaAnalysis;
use crate::prompt::ad_copy_prompt;
use crate::TARGET_LLM_REQUEST;

pub use mock::mock_variations;
pub use palette::{choose_theme, palette_for, PaletteTheme};
pub use parser::parse_ad_copy;
pub use types::{AdCopy, AdCopyVariations, Platform};

pub struct AdCopyAssembler {
    generator: Arc<dyn TextGenerator>,
}

impl AdCopyAssembler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Copy for every platform.
    ///
    /// In real mode each platform is generated separately and parsed with a
    /// per-field fallback to the template. If any generation call fails the
    /// whole set falls back to the templates.
    pub async fn generate(
        &self,
        settings: &ApiSettings,
        analysis: &PersonaAnalysis,
        insights: &NewsInsights,
        age_bracket: &str,
        interests: &[String],
        location: &str,
    ) -> Result<Outcome<AdCopyVariations>, IntelError> {
        let templates = mock_variations(analysis, age_bracket, interests, location);

        if !settings.use_real_apis {
            return Ok(Outcome::primary(templates, Mode::Mock));
        }
        if let Err(cause) = settings.text_generation_ready() {
            warn!(target: TARGET_LLM_REQUEST, "Text generation not configured, using template ad copy: {}", cause);
            return Ok(Outcome::recovered(templates, Mode::Mock, cause));
        }

        let responses = join_all(Platform::ALL.iter().map(|platform| {
            let prompt = ad_copy_prompt(*platform, analysis, insights, age_bracket, interests, location);
            debug!(target: TARGET_LLM_REQUEST, "Requesting {} ad copy", platform);
            async move { self.generator.generate(settings, &prompt).await }
        }))
        .await;

        let mut texts = Vec::with_capacity(responses.len());
        for response in responses {
            match response {
                Ok(text) => texts.push(text),
                Err(cause) if cause.is_recoverable() => {
                    warn!(target: TARGET_LLM_REQUEST, "Ad copy generation failed, using template ad copy: {}", cause);
                    return Ok(Outcome::recovered(templates, Mode::Mock, cause));
                }
                Err(fatal) => return Err(fatal),
            }
        }

        let parsed: Vec<Outcome<AdCopy>> = Platform::ALL
            .iter()
            .zip(&texts)
            .map(|(platform, text)| parse_ad_copy(text, *platform, templates.get(*platform)))
            .collect();

        let mode = if parsed.iter().any(|outcome| outcome.mode == Mode::Real) {
            Mode::Real
        } else {
            Mode::Mock
        };
        let recovery = parsed.iter().find_map(|outcome| outcome.recovery.clone());

        let mut copies = parsed.into_iter().map(Outcome::into_value);
        let variations = AdCopyVariations::from_fn(|platform| {
            copies
                .next()
                .unwrap_or_else(|| templates.get(platform).clone())
        });

        info!(target: TARGET_LLM_REQUEST, "Generated ad copy for {} platforms ({})", Platform::ALL.len(), mode);
        Ok(match recovery {
            Some(cause) => Outcome::recovered(variations, mode, cause),
            None => Outcome::primary(variations, mode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::insights::generate_insights;
    use crate::persona::analyze;
    use crate::testing::{real_settings, StubTextGenerator};

    const GOOD_RESPONSE: &str = "HEADLINE: Made for makers\nBODY: Build more.\nKEYWORDS: build, create\nCTA: Start Now\nCOLOR_PALETTE: #3A86FF, #8338EC, #06D6A0 - bright";

    fn inputs() -> (PersonaAnalysis, NewsInsights, Vec<String>) {
        let interests = vec!["technology".to_string()];
        let analysis = analyze("25-34", "Seattle", &interests);
        let insights = generate_insights(&[], "25-34", &interests);
        (analysis, insights, interests)
    }

    #[tokio::test]
    async fn test_mock_mode_twice_is_identical() {
        let (analysis, insights, interests) = inputs();
        let stub = Arc::new(StubTextGenerator::replying(GOOD_RESPONSE));
        let assembler = AdCopyAssembler::new(stub.clone());
        let settings = ApiSettings::default();

        let first = assembler
            .generate(&settings, &analysis, &insights, "25-34", &interests, "Seattle")
            .await
            .unwrap();
        let second = assembler
            .generate(&settings, &analysis, &insights, "25-34", &interests, "Seattle")
            .await
            .unwrap();

        assert_eq!(first.mode, Mode::Mock);
        assert!(!first.is_recovered());
        assert_eq!(first.value, second.value);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_real_mode_parses_each_platform() {
        let (analysis, insights, interests) = inputs();
        let stub = Arc::new(StubTextGenerator::replying(GOOD_RESPONSE));
        let assembler = AdCopyAssembler::new(stub.clone());

        let outcome = assembler
            .generate(&real_settings(), &analysis, &insights, "25-34", &interests, "Seattle")
            .await
            .unwrap();

        assert_eq!(outcome.mode, Mode::Real);
        assert!(!outcome.is_recovered());
        assert_eq!(outcome.value.linkedin.headline, "Made for makers");
        assert_eq!(stub.calls(), 3);
    }

    #[tokio::test]
    async fn test_partial_response_recovers_per_field() {
        let (analysis, insights, interests) = inputs();
        let assembler = AdCopyAssembler::new(Arc::new(StubTextGenerator::replying("HEADLINE: Just this")));
        let templates = mock_variations(&analysis, "25-34", &interests, "Seattle");

        let outcome = assembler
            .generate(&real_settings(), &analysis, &insights, "25-34", &interests, "Seattle")
            .await
            .unwrap();

        assert_eq!(outcome.mode, Mode::Real);
        assert!(matches!(outcome.recovery, Some(IntelError::Parse(_))));
        assert_eq!(outcome.value.instagram.headline, "Just this");
        assert_eq!(outcome.value.instagram.body, templates.instagram.body);
    }

    #[tokio::test]
    async fn test_unreachable_generator_falls_back_entirely() {
        let (analysis, insights, interests) = inputs();
        let assembler = AdCopyAssembler::new(Arc::new(StubTextGenerator::failing(IntelError::Fetch(
            "connection refused".into(),
        ))));

        let outcome = assembler
            .generate(&real_settings(), &analysis, &insights, "25-34", &interests, "Seattle")
            .await
            .unwrap();

        assert_eq!(outcome.mode, Mode::Mock);
        assert_eq!(outcome.recovery, Some(IntelError::Fetch("connection refused".into())));
        assert_eq!(
            outcome.value,
            mock_variations(&analysis, "25-34", &interests, "Seattle")
        );
    }

    #[tokio::test]
    async fn test_pipeline_error_propagates() {
        let (analysis, insights, interests) = inputs();
        let assembler = AdCopyAssembler::new(Arc::new(StubTextGenerator::failing(IntelError::Pipeline(
            "bug".into(),
        ))));

        let result = assembler
            .generate(&real_settings(), &analysis, &insights, "25-34", &interests, "Seattle")
            .await;
        assert!(matches!(result, Err(IntelError::Pipeline(_))));
    }
}
