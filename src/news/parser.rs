//! Feed parsing for RSS, Atom, and JSON Feed documents.

use feed_rs::model::Entry;
use feed_rs::parser;
use std::io::Cursor;
use tracing::debug;

use super::types::FeedEntry;
use super::util::{cleanup_xml, strip_html};
use crate::error::IntelError;
use crate::TARGET_WEB_REQUEST;

/// Parses a feed body into entries, retrying once after XML cleanup.
pub fn parse_feed(body: &str, url: &str) -> Result<Vec<FeedEntry>, IntelError> {
    let first_err = match parser::parse(Cursor::new(body.as_bytes())) {
        Ok(feed) => return Ok(feed.entries.into_iter().filter_map(to_entry).collect()),
        Err(err) => err,
    };

    let cleaned_xml = cleanup_xml(body);
    if !(cleaned_xml.contains("<rss") || cleaned_xml.contains("<feed") || cleaned_xml.contains("<rdf")) {
        let preview = if body.chars().all(|c| c.is_ascii_graphic() || c.is_whitespace()) {
            body.chars().take(100).collect::<String>()
        } else {
            "[binary data]".to_string()
        };
        return Err(IntelError::Parse(format!(
            "{} doesn't appear to be RSS or Atom. Content preview: {}",
            url, preview
        )));
    }

    match parser::parse(Cursor::new(cleaned_xml.into_bytes())) {
        Ok(feed) => {
            debug!(target: TARGET_WEB_REQUEST, "Feed {} parsed after XML cleanup", url);
            Ok(feed.entries.into_iter().filter_map(to_entry).collect())
        }
        Err(second_err) => Err(IntelError::Parse(format!(
            "Failed to parse {} even after cleanup. First error: {}. Second error: {}",
            url, first_err, second_err
        ))),
    }
}

/// Entries without a title or link are of no use to a report.
fn to_entry(entry: Entry) -> Option<FeedEntry> {
    let title = strip_html(&entry.title?.content);
    let url = entry.links.first()?.href.clone();
    if title.is_empty() {
        return None;
    }

    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .map(|s| strip_html(&s))
        .unwrap_or_default();

    Some(FeedEntry {
        title,
        summary,
        url,
        published: entry.published.or(entry.updated),
    })
}
