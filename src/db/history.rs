use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::core::Database;
use crate::persona::PersonaProfile;
use crate::report::IntelligenceReport;
use crate::TARGET_DB;

pub const CAMPAIGN_HISTORY: &str = "campaign_history";

/// A saved report, as written to the `campaign_history` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignHistoryEntry {
    pub id: Uuid,
    pub age_bracket: String,
    pub location: String,
    pub interests: Vec<String>,
    pub title: String,
    pub intelligence_data: IntelligenceReport,
    pub created_at: DateTime<Utc>,
}

/// `"<age> | <location> | <first three interests>"`.
pub fn campaign_title(profile: &PersonaProfile) -> String {
    format!(
        "{} | {} | {}",
        profile.age_bracket,
        profile.location,
        profile
            .interests
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    )
}

impl CampaignHistoryEntry {
    pub fn new(profile: &PersonaProfile, report: IntelligenceReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            age_bracket: profile.age_bracket.clone(),
            location: profile.location.clone(),
            interests: profile.interests.clone(),
            title: campaign_title(profile),
            intelligence_data: report,
            created_at: Utc::now(),
        }
    }
}

/// The listing view of a saved campaign; the report body is left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub id: Uuid,
    pub title: String,
    pub age_bracket: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Saved campaigns and how many of them there are in total.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignHistory {
    pub total: i64,
    pub campaigns: Vec<CampaignSummary>,
}

impl Database {
    /// The `limit` most recently saved campaigns, newest first.
    pub async fn campaign_history(&self, limit: i64) -> Result<CampaignHistory, sqlx::Error> {
        let total = self.count_documents(CAMPAIGN_HISTORY).await?;
        let campaigns = self
            .recent_documents(CAMPAIGN_HISTORY, limit)
            .await?
            .into_iter()
            .filter_map(|document| match serde_json::from_value(document) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!(target: TARGET_DB, "Skipping malformed campaign history entry: {}", e);
                    None
                }
            })
            .collect();

        Ok(CampaignHistory { total, campaigns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ReportStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_campaign_history_lists_newest_first() {
        let db = Database::in_memory().await.unwrap();
        for (i, title) in ["25-34 | Chicago | tech", "18-24 | Austin | music"].iter().enumerate() {
            db.insert_one(
                CAMPAIGN_HISTORY,
                json!({
                    "id": Uuid::new_v4(),
                    "title": title,
                    "age_bracket": "25-34",
                    "location": "Chicago",
                    "interests": ["tech"],
                    "created_at": format!("2024-01-1{}T00:00:00Z", i + 1),
                }),
            )
            .await
            .unwrap();
        }
        db.insert_one(CAMPAIGN_HISTORY, json!({"title": "missing fields"}))
            .await
            .unwrap();
        db.insert_one("other", json!({"title": "elsewhere"})).await.unwrap();

        let history = db.campaign_history(2).await.unwrap();
        assert_eq!(history.total, 3);
        // the malformed newest entry is skipped, leaving one of the two requested
        assert_eq!(history.campaigns.len(), 1);
        assert_eq!(history.campaigns[0].title, "18-24 | Austin | music");
    }

    #[test]
    fn test_title_uses_first_three_interests() {
        let profile = PersonaProfile::new("25-34", "Chicago", &["tech", "travel", "food", "art"]);
        assert_eq!(campaign_title(&profile), "25-34 | Chicago | tech, travel, food");

        let bare = PersonaProfile::new("55+", "Miami", &[]);
        assert_eq!(campaign_title(&bare), "55+ | Miami | ");
    }
}
