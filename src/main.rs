use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_digest::config;
use feed_digest::fetcher::Fetcher;
use feed_digest::output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feed_digest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let feeds_file =
        std::env::var("FEEDS_FILE").unwrap_or_else(|_| "feeds.json".to_string());
    let output_file =
        std::env::var("OUTPUT_FILE").unwrap_or_else(|_| "feed-data.json".to_string());

    // Load the feed list; a broken list is fatal
    let feeds = config::load_feeds(&feeds_file)?;
    info!("Loaded {} feeds from {}", feeds.len(), feeds_file);

    // Fetch every feed, keeping the newest entry from each
    let fetcher = Fetcher::new();
    let mut entries = fetcher.collect_latest(&feeds).await;

    // Sort newest first and persist for the site to render
    output::sort_entries(&mut entries);
    output::write_entries(&output_file, &entries)?;

    info!(
        "Successfully processed {} entries, saved to {}",
        entries.len(),
        output_file
    );

    Ok(())
}
