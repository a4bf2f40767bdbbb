use std::time::Duration;

use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::{redirect, Client};
use tracing::{error, info, warn};

use crate::config::FeedConfig;
use crate::normalize::{self, NormalizedEntry};

const USER_AGENT: &str = "feed-digest/0.1 (Static RSS Aggregator)";
const MAX_REDIRECTS: usize = 10;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure while fetching or parsing a single feed. These are caught at
/// the per-feed boundary and never abort the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed body could not be parsed: {0}")]
    Parse(#[from] parser::ParseFeedError),
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch one feed and parse it into entries, preserving source order
    /// (newest first by feed convention). A non-success HTTP status counts
    /// as a fetch failure.
    pub async fn fetch_entries(&self, feed: &FeedConfig) -> Result<Vec<Entry>, FetchError> {
        let response = self
            .client
            .get(&feed.url)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        let parsed = parser::parse(&bytes[..])?;
        Ok(parsed.entries)
    }

    /// Process every feed in order, keeping the newest entry from each.
    /// A failing feed is logged and skipped; the run continues.
    pub async fn collect_latest(&self, feeds: &[FeedConfig]) -> Vec<NormalizedEntry> {
        info!("Processing {} feeds", feeds.len());

        let mut collected = Vec::new();

        for feed in feeds {
            info!("Fetching feed: {} ({})", feed.name, feed.url);
            match self.fetch_entries(feed).await {
                Ok(entries) => match normalize::normalize_latest(feed, &entries) {
                    Some(entry) => collected.push(entry),
                    None => warn!("Feed '{}' has no entries", feed.name),
                },
                Err(e) => error!("Skipping failed feed '{}': {}", feed.name, e),
            }
        }

        collected
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
