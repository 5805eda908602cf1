use anyhow::Result;
use chrono::{Duration, Utc};
use colored::Colorize;
use std::env;

use periscope::logging;
use periscope::news::parser::parse_feed;
use periscope::news::types::{NewsCategory, RECENCY_WINDOW_DAYS};
use periscope::news::{categorize, FeedFetcher, HttpFeedFetcher};

fn print_usage(program: &str) {
    println!("Usage: {} <feed-url>", program);
    println!("Fetches one feed and prints its recent entries with their categories.");
}

fn colored_category(category: NewsCategory) -> colored::ColoredString {
    let label = category.as_str();
    match category {
        NewsCategory::General => label.dimmed(),
        NewsCategory::Technology => label.bright_cyan(),
        NewsCategory::Business => label.bright_green(),
        _ => label.bright_magenta(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        return Ok(());
    }
    let url = &args[1];

    println!("Testing feed: {}", url.bright_yellow());
    let fetcher = HttpFeedFetcher::new()?;
    let body = match fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            println!("{}: {}", "Fetch failed".bright_red(), e);
            std::process::exit(1);
        }
    };

    let entries = match parse_feed(&body, url) {
        Ok(entries) => entries,
        Err(e) => {
            println!("{}: {}", "Parse failed".bright_red(), e);
            std::process::exit(1);
        }
    };

    let cutoff = Utc::now() - Duration::days(RECENCY_WINDOW_DAYS);
    let recent: Vec<_> = entries
        .iter()
        .filter(|entry| entry.published.is_some_and(|published| published >= cutoff))
        .collect();

    println!("\n{}", "═".repeat(100).bright_blue());
    println!(
        "{}: {}   {}: {}",
        "Entries Found".bright_blue(),
        entries.len(),
        "Recent".bright_blue(),
        recent.len()
    );
    println!("{}", "═".repeat(100).bright_blue());

    for (i, entry) in recent.iter().enumerate() {
        let category = categorize(&entry.title, &entry.summary);
        let published = entry
            .published
            .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}. [{}] {} ({})\n   {}",
            i + 1,
            colored_category(category),
            entry.title.bright_white(),
            published.dimmed(),
            entry.url
        );
    }

    Ok(())
}
