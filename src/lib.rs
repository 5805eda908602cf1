pub mod ad_copy;
pub mod config;
pub mod db;
pub mod environment;
pub mod error;
pub mod image;
pub mod llm;
pub mod logging;
pub mod news;
pub mod orchestrator;
pub mod persona;
pub mod prompt;
pub mod report;
pub mod visuals;

#[cfg(test)]
mod testing;

use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;

pub use config::{ApiSettings, SharedSettings};
pub use error::{IntelError, Mode, Outcome};
pub use orchestrator::Orchestrator;
pub use persona::PersonaProfile;
pub use report::IntelligenceReport;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
pub const TARGET_DB: &str = "db_query";
pub const TARGET_PIPELINE: &str = "pipeline";

#[derive(Clone, Debug)]
pub enum LLMClient {
    Ollama(Ollama),
    OpenAI(OpenAIClient<OpenAIConfig>),
}

/// Everything needed to issue one text generation request.
#[derive(Clone, Debug)]
pub struct LLMParams {
    pub llm_client: LLMClient,
    pub model: String,
    pub temperature: f32,
}
