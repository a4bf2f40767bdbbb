use serde::Deserialize;
use std::path::Path;

use anyhow::Context;

/// One feed source: a display name and the feed URL.
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

/// Load the feed list from a JSON file containing an array of
/// `{"name": ..., "url": ...}` objects. Any failure here is fatal to the
/// run; there is no partial recovery from a broken feed list.
pub fn load_feeds<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<FeedConfig>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read feed list {}", path.display()))?;
    parse_feeds(&content).with_context(|| format!("failed to parse feed list {}", path.display()))
}

/// Parse a feed list from a JSON string (useful for testing)
pub fn parse_feeds(content: &str) -> anyhow::Result<Vec<FeedConfig>> {
    let feeds: Vec<FeedConfig> = serde_json::from_str(content)?;

    for feed in &feeds {
        if feed.name.trim().is_empty() || feed.url.trim().is_empty() {
            anyhow::bail!("feed entries must have a non-empty name and url");
        }
    }

    Ok(feeds)
}
