use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use periscope::config::SettingsUpdate;
use periscope::db::Database;
use periscope::image::OpenAiImageGenerator;
use periscope::llm::LlmTextGenerator;
use periscope::logging;
use periscope::news::{FeedCatalog, HttpFeedFetcher};
use periscope::persona::{find_sample, trending_keywords, PersonaProfile, SAMPLE_PERSONAS};
use periscope::{ApiSettings, Orchestrator, SharedSettings, TARGET_PIPELINE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Marketing intelligence reports for target personas", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a report and print it as JSON
    Generate {
        /// Age bracket: 18-24, 25-34, 35-44, 45-54 or 55+
        #[arg(short = 'a', long, default_value = "25-34")]
        age: String,

        /// Free-text location, e.g. "London, UK"
        #[arg(short = 'l', long, default_value = "")]
        location: String,

        /// Comma-separated interests, highest priority first
        #[arg(short = 'i', long, value_delimiter = ',')]
        interests: Vec<String>,

        /// Use a preset persona instead of the flags above
        #[arg(short = 's', long)]
        sample: Option<String>,

        /// Seed for the word cloud and demographic estimates
        #[arg(long)]
        seed: Option<u64>,

        /// Save the report to the campaign history
        #[arg(long)]
        persist: bool,

        /// Use real generation APIs regardless of USE_REAL_APIS
        #[arg(long)]
        real: bool,
    },
    /// List the preset personas
    Samples,
    /// Show trending keywords for a market and industry
    Trending {
        #[arg(short = 'l', long, default_value = "global")]
        location: String,

        #[arg(short = 'i', long, default_value = "general")]
        industry: String,
    },
    /// List recently saved campaigns
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: i64,
    },
    /// Show which generation APIs are configured
    Status,
}

fn resolve_profile(
    age: String,
    location: String,
    interests: Vec<String>,
    sample: Option<String>,
) -> Result<PersonaProfile> {
    if let Some(name) = sample {
        return match find_sample(&name) {
            Some(sample) => Ok(sample.profile()),
            None => bail!("Unknown sample persona: {}", name),
        };
    }
    Ok(PersonaProfile {
        age_bracket: age,
        location,
        interests: interests
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();
    let args = Args::parse();
    let settings = SharedSettings::new(ApiSettings::from_env());

    match args.command {
        Command::Generate {
            age,
            location,
            interests,
            sample,
            seed,
            persist,
            real,
        } => {
            let profile = resolve_profile(age, location, interests, sample)?;
            if real {
                settings.update(SettingsUpdate {
                    use_real_apis: Some(true),
                    ..Default::default()
                });
            }

            let fetcher = HttpFeedFetcher::new()?.with_feed_budget(settings.snapshot().feed_timeout);
            let mut orchestrator = Orchestrator::new(
                settings,
                Arc::new(fetcher),
                FeedCatalog::from_env(),
                Arc::new(LlmTextGenerator),
                Arc::new(OpenAiImageGenerator),
            );
            if let Some(seed) = seed {
                orchestrator = orchestrator.with_seed(seed);
            }
            if persist {
                orchestrator = orchestrator.with_store(Arc::new(Database::from_env().await?));
            }

            let report = orchestrator.generate(&profile).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            // Wait for the history write so the process does not exit first
            orchestrator.record(&profile, &report).await?;
            info!(target: TARGET_PIPELINE, "Done");
        }
        Command::Samples => {
            println!("{}", serde_json::to_string_pretty(SAMPLE_PERSONAS)?);
        }
        Command::Trending { location, industry } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&trending_keywords(&location, &industry))?
            );
        }
        Command::History { limit } => {
            let db = Database::from_env().await?;
            println!("{}", serde_json::to_string_pretty(&db.campaign_history(limit).await?)?);
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&settings.status())?);
        }
    }

    Ok(())
}
