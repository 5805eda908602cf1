mod core;
mod documents;
pub mod history;
mod schema;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::IntelError;

pub use self::core::{Database, DEFAULT_DATABASE_PATH};
pub use self::history::{
    campaign_title, CampaignHistory, CampaignHistoryEntry, CampaignSummary, CAMPAIGN_HISTORY,
};

/// The document store finished reports are written to.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), IntelError>;
}
