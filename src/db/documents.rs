use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, instrument};

use super::core::Database;
use super::ReportStore;
use crate::error::IntelError;
use crate::TARGET_DB;

impl Database {
    /// Most recent documents in `collection`, newest first.
    #[instrument(target = "db", level = "info", skip(self))]
    pub async fn recent_documents(
        &self,
        collection: &str,
        limit: i64,
    ) -> Result<Vec<Value>, sqlx::Error> {
        let bodies = sqlx::query_scalar::<_, String>(
            "SELECT body FROM documents WHERE collection = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(collection)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(bodies
            .iter()
            .filter_map(|body| serde_json::from_str(body).ok())
            .collect())
    }

    pub async fn count_documents(&self, collection: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(self.pool())
            .await
    }
}

#[async_trait]
impl ReportStore for Database {
    #[instrument(target = "db", level = "info", skip(self, document))]
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), IntelError> {
        let body = serde_json::to_string(&document)
            .map_err(|e| IntelError::Parse(format!("unserializable document: {}", e)))?;

        sqlx::query("INSERT INTO documents (collection, body, created_at) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(body)
            .bind(Utc::now().to_rfc3339())
            .execute(self.pool())
            .await
            .map_err(|e| IntelError::Fetch(format!("insert into {} failed: {}", collection, e)))?;

        debug!(target: TARGET_DB, "Inserted document into {}", collection);
        Ok(())
    }
}
