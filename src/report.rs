//! The assembled marketing intelligence report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ad_copy::AdCopyVariations;
use crate::error::{Mode, StepTrace};
use crate::news::{NewsArticle, NewsDigest};
use crate::persona::{PersonaProfile, TrendingKeywordsAnalysis};
use crate::visuals::{DemographicBreakdown, MotivationScore, WeightedTerm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportNewsInsights {
    pub summary: String,
    pub actionable_recommendations: Vec<String>,
    pub trending_topics: Vec<String>,
    pub recent_articles: Vec<NewsArticle>,
    pub campaign_timing: String,
    pub target_channels: Vec<String>,
}

impl From<NewsDigest> for ReportNewsInsights {
    fn from(digest: NewsDigest) -> Self {
        let NewsDigest { articles, insights } = digest;
        Self {
            summary: insights.summary,
            actionable_recommendations: insights.actionable_recommendations,
            trending_topics: insights.trending_topics,
            recent_articles: articles,
            campaign_timing: insights.campaign_timing,
            target_channels: insights.target_channels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub mode: Mode,
    pub persona_profile: PersonaProfile,
    /// How each generation step executed, keyed by step name.
    pub execution: BTreeMap<String, StepTrace>,
}

/// One complete report. Built once per request and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceReport {
    pub trending_keywords_analysis: TrendingKeywordsAnalysis,
    pub behavior_analysis_summary: String,
    pub news_insights: ReportNewsInsights,
    pub persona_image_url: String,
    pub ad_copy_variations: AdCopyVariations,
    pub word_cloud_data: Vec<WeightedTerm>,
    pub behavioral_analysis_chart: Vec<MotivationScore>,
    pub demographic_breakdown: DemographicBreakdown,
    pub metadata: ReportMetadata,
}

impl IntelligenceReport {
    pub fn article_count(&self) -> usize {
        self.news_insights.recent_articles.len()
    }
}
