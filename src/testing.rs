//! In-process stand-ins for external collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::time::{sleep, Duration};

use crate::config::ApiSettings;
use crate::db::ReportStore;
use crate::error::IntelError;
use crate::image::{GeneratedImage, ImageGenerator};
use crate::llm::TextGenerator;
use crate::news::FeedFetcher;

/// Settings with real mode on and an (unused) OpenAI key.
pub fn real_settings() -> ApiSettings {
    ApiSettings {
        use_real_apis: true,
        openai_api_key: Some("sk-test".to_string()),
        generation_timeout: Duration::from_secs(1),
        ..Default::default()
    }
}

enum FeedResponse {
    Body(String),
    Fail,
    Slow(Duration),
}

/// Serves canned bodies by URL. Unknown URLs fail.
#[derive(Default)]
pub struct StubFeedFetcher {
    responses: HashMap<String, FeedResponse>,
}

impl StubFeedFetcher {
    pub fn serving(mut self, url: &str, body: String) -> Self {
        self.responses.insert(url.to_string(), FeedResponse::Body(body));
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), FeedResponse::Fail);
        self
    }

    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.responses.insert(url.to_string(), FeedResponse::Slow(delay));
        self
    }
}

#[async_trait]
impl FeedFetcher for StubFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, IntelError> {
        match self.responses.get(url) {
            Some(FeedResponse::Body(body)) => Ok(body.clone()),
            Some(FeedResponse::Slow(delay)) => {
                sleep(*delay).await;
                Err(IntelError::Fetch(format!("{} answered too late", url)))
            }
            Some(FeedResponse::Fail) | None => {
                Err(IntelError::Fetch(format!("{} unreachable", url)))
            }
        }
    }
}

/// A minimal RSS 2.0 document with one item per `(title, published)` pair.
pub fn rss_document(items: &[(&str, Option<DateTime<Utc>>)]) -> String {
    let items: String = items
        .iter()
        .enumerate()
        .map(|(i, (title, published))| {
            let pub_date = published
                .map(|date| format!("<pubDate>{}</pubDate>", date.to_rfc2822()))
                .unwrap_or_default();
            format!(
                "<item><title>{}</title><link>https://stub.test/articles/{}</link>{}</item>",
                title, i, pub_date
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Stub</title><link>https://stub.test</link><description>Stub feed</description>{}</channel></rss>"#,
        items
    )
}

/// Answers every prompt with the same text or the same error.
pub struct StubTextGenerator {
    reply: Result<String, IntelError>,
    calls: AtomicUsize,
}

impl StubTextGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: IntelError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn generate(&self, _settings: &ApiSettings, _prompt: &str) -> Result<String, IntelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Returns a fixed image and records the prompts it was given.
pub struct StubImageGenerator {
    reply: Result<GeneratedImage, IntelError>,
    prompts: Mutex<Vec<String>>,
}

impl StubImageGenerator {
    fn with_reply(reply: Result<GeneratedImage, IntelError>) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn url(url: &str) -> Self {
        Self::with_reply(Ok(GeneratedImage::Url(url.to_string())))
    }

    pub fn bytes(bytes: Vec<u8>) -> Self {
        Self::with_reply(Ok(GeneratedImage::Bytes(bytes)))
    }

    pub fn failing(error: IntelError) -> Self {
        Self::with_reply(Err(error))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubImageGenerator {
    async fn generate_image(
        &self,
        _settings: &ApiSettings,
        prompt: &str,
    ) -> Result<GeneratedImage, IntelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Keeps inserted documents in memory, or fails every insert.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<(String, Value)>>,
    fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn documents(&self) -> Vec<(String, Value)> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), IntelError> {
        if self.fail {
            return Err(IntelError::Fetch("store offline".into()));
        }
        self.documents
            .lock()
            .unwrap()
            .push((collection.to_string(), document));
        Ok(())
    }
}
