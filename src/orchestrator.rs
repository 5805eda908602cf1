//! Sequences the generation steps into one report.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::ad_copy::AdCopyAssembler;
use crate::config::{ApiSettings, SharedSettings};
use crate::db::{CampaignHistoryEntry, ReportStore, CAMPAIGN_HISTORY};
use crate::error::{IntelError, Mode, StepTrace};
use crate::image::{ImageDescriptor, ImageGenerator};
use crate::llm::TextGenerator;
use crate::news::{FeedCatalog, FeedFetcher, NewsAggregator};
use crate::persona::{analyze, PersonaProfile};
use crate::report::{IntelligenceReport, ReportMetadata};
use crate::visuals::{demographic_breakdown, score, weight};
use crate::{TARGET_DB, TARGET_PIPELINE};

pub struct Orchestrator {
    settings: SharedSettings,
    news: NewsAggregator,
    images: ImageDescriptor,
    ad_copy: AdCopyAssembler,
    store: Option<Arc<dyn ReportStore>>,
    seed: Option<u64>,
}

fn pipeline_failure(step: &str, cause: IntelError) -> IntelError {
    error!(target: TARGET_PIPELINE, "Marketing intelligence generation failed at {}: {}", step, cause);
    match cause {
        IntelError::Pipeline(_) => cause,
        other => IntelError::Pipeline(format!("{}: {}", step, other)),
    }
}

impl Orchestrator {
    pub fn new(
        settings: SharedSettings,
        fetcher: Arc<dyn FeedFetcher>,
        catalog: FeedCatalog,
        text: Arc<dyn TextGenerator>,
        image: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            settings,
            news: NewsAggregator::new(fetcher, catalog),
            images: ImageDescriptor::new(image),
            ad_copy: AdCopyAssembler::new(text),
            store: None,
            seed: None,
        }
    }

    /// Saves every returned report to `store` in the background.
    pub fn with_store(mut self, store: Arc<dyn ReportStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Makes the word cloud jitter and demographic split reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Generates a report, then saves it and logs analytics without waiting.
    pub async fn handle_request(
        &self,
        profile: &PersonaProfile,
    ) -> Result<IntelligenceReport, IntelError> {
        let report = self.generate(profile).await?;
        self.record(profile, &report);
        Ok(report)
    }

    /// Generates a report against one snapshot of the current settings.
    pub async fn generate(&self, profile: &PersonaProfile) -> Result<IntelligenceReport, IntelError> {
        let settings = self.settings.snapshot();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with(&settings, profile, &mut rng).await
    }

    /// The pipeline itself, with settings and randomness supplied by the caller.
    pub async fn generate_with<R: Rng + Send>(
        &self,
        settings: &ApiSettings,
        profile: &PersonaProfile,
        rng: &mut R,
    ) -> Result<IntelligenceReport, IntelError> {
        let PersonaProfile {
            age_bracket,
            location,
            interests,
        } = profile;
        info!(target: TARGET_PIPELINE, "Generating marketing intelligence for {} persona in {} ({} mode)", age_bracket, location, if settings.use_real_apis { Mode::Real } else { Mode::Mock });

        let analysis = analyze(age_bracket, location, interests);
        debug!(target: TARGET_PIPELINE, "Persona analysis produced {} keywords", analysis.keywords().len());

        let news = self
            .news
            .fetch(settings.feed_timeout, location, interests, age_bracket)
            .await;

        let image = self
            .images
            .describe(settings, age_bracket, location, interests, analysis.keywords())
            .await
            .map_err(|e| pipeline_failure("persona image", e))?;

        let ad_copy = self
            .ad_copy
            .generate(
                settings,
                &analysis,
                &news.value.insights,
                age_bracket,
                interests,
                location,
            )
            .await
            .map_err(|e| pipeline_failure("ad copy", e))?;

        let word_cloud_data = weight(analysis.keywords(), rng);
        let behavioral_analysis_chart = score(age_bracket, interests, Some(location.as_str()));
        let demographics = demographic_breakdown(age_bracket, location, interests, rng);

        let mode = if image.mode == Mode::Real || ad_copy.mode == Mode::Real {
            Mode::Real
        } else {
            Mode::Mock
        };
        let execution: BTreeMap<String, StepTrace> = [
            ("news", news.trace()),
            ("persona_image", image.trace()),
            ("ad_copy", ad_copy.trace()),
        ]
        .into_iter()
        .map(|(step, trace)| (step.to_string(), trace))
        .collect();

        let report = IntelligenceReport {
            trending_keywords_analysis: analysis.trending_keywords_analysis,
            behavior_analysis_summary: analysis.narrative,
            news_insights: news.into_value().into(),
            persona_image_url: image.into_value(),
            ad_copy_variations: ad_copy.into_value(),
            word_cloud_data,
            behavioral_analysis_chart,
            demographic_breakdown: demographics,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                mode,
                persona_profile: profile.clone(),
                execution,
            },
        };

        info!(target: TARGET_PIPELINE, "Marketing intelligence generated successfully ({} mode)", mode);
        Ok(report)
    }

    /// Detached follow-up for a returned report: campaign history insert and
    /// an analytics log line. Failures are logged only.
    pub fn record(&self, profile: &PersonaProfile, report: &IntelligenceReport) -> JoinHandle<()> {
        let store = self.store.clone();
        let profile = profile.clone();
        let report = report.clone();

        tokio::spawn(async move {
            info!(
                target: TARGET_PIPELINE,
                "Marketing Intelligence Analytics - Age: {}, Location: {}, Interests: {}, News Articles: {}",
                profile.age_bracket,
                profile.location,
                profile.interests.len(),
                report.article_count()
            );

            let Some(store) = store else {
                return;
            };
            let entry = CampaignHistoryEntry::new(&profile, report);
            let title = entry.title.clone();
            let result = match serde_json::to_value(&entry) {
                Ok(document) => store.insert_one(CAMPAIGN_HISTORY, document).await,
                Err(e) => Err(IntelError::Parse(e.to_string())),
            };
            match result {
                Ok(()) => info!(target: TARGET_DB, "Campaign auto-saved to history: {}", title),
                Err(e) => error!(target: TARGET_DB, "Failed to auto-save campaign to history: {}", e),
            }
        })
    }
}
