use std::io;
use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::filter::FilterFn;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const STDOUT_FILTER: &str = "info,llm_request=info,web_request=warn,db_query=warn,sqlx=off";
const FILE_FILTER: &str = "llm_request=debug,info,sqlx=info";

pub fn configure_logging() {
    // html5ever and feed-rs both complain loudly about sloppy feed markup
    let custom_filter = FilterFn::new(|metadata| {
        !(metadata.level() == &Level::WARN
            && (metadata.target() == "html5ever::serialize"
                || metadata.target().starts_with("feed_rs")))
    });

    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(STDOUT_FILTER));

    // Stdout is reserved for report JSON in the CLI, so console logs go to stderr
    let console_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(stdout_filter)
        .with_filter(custom_filter);

    let file_appender = rolling::daily("logs", "periscope.log");
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(EnvFilter::new(FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
