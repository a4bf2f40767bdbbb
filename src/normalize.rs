use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::config::FeedConfig;

/// Maximum snippet length in characters, before the ellipsis marker.
pub const SNIPPET_MAX_CHARS: usize = 500;

const MISSING_TITLE: &str = "No Title Available";

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script.*?</script>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style.*?</style>").unwrap();
}

/// One feed's newest entry, flattened into the shape the static site
/// renders. Serialized field names are camelCase; absent author/image
/// serialize as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntry {
    pub source_name: String,
    pub source_url: String,
    pub title: String,
    pub link: String,
    pub date: DateTime<Utc>,
    pub snippet: String,
    pub content_html: String,
    pub author: Option<String>,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
}

/// Keep only the newest entry of a feed. Feeds list newest first, so that
/// is the first item; an empty feed contributes nothing.
pub fn normalize_latest(feed: &FeedConfig, entries: &[Entry]) -> Option<NormalizedEntry> {
    entries.first().map(|entry| normalize_entry(feed, entry))
}

pub fn normalize_entry(feed: &FeedConfig, entry: &Entry) -> NormalizedEntry {
    let raw_content = resolve_content(entry);

    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| MISSING_TITLE.to_string());

    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let date = entry.published.or(entry.updated).unwrap_or_else(Utc::now);

    NormalizedEntry {
        source_name: feed.name.clone(),
        source_url: feed.url.clone(),
        title,
        link,
        date,
        snippet: truncate_snippet(sanitize_snippet(&raw_content)),
        content_html: clean_html_content(&raw_content),
        author: resolve_author(entry),
        categories: resolve_categories(entry),
        image_url: resolve_image(entry),
    }
}

/// Pick the entry body from an ordered candidate list: full content
/// (RSS `content:encoded` / Atom content), then summary/description, then
/// a media description. First non-blank candidate wins.
fn resolve_content(entry: &Entry) -> String {
    let candidates = [
        entry.content.as_ref().and_then(|c| c.body.clone()),
        entry.summary.as_ref().map(|t| t.content.clone()),
        entry
            .media
            .first()
            .and_then(|m| m.description.as_ref().map(|t| t.content.clone())),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|body| !body.trim().is_empty())
        .unwrap_or_default()
}

/// Reduce HTML to plain text: strip tags by pattern, decode the handful of
/// entities that show up in feed bodies, trim. Lossy; not a security
/// sanitizer.
pub fn sanitize_snippet(html: &str) -> String {
    let text = TAG.replace_all(html, "");

    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .trim()
        .to_string()
}

/// Keep the entry HTML for rendering, minus `<script>` and `<style>`
/// blocks (matched case-insensitively, across newlines).
pub fn clean_html_content(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(html, "");
    let without_styles = STYLE_BLOCK.replace_all(&without_scripts, "");
    without_styles.trim().to_string()
}

fn truncate_snippet(text: String) -> String {
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text;
    }

    let mut truncated: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Byline for the entry. Feeds put authors in either `authors` (RSS
/// `author` and `dc:creator` both land there) or `contributors`; the first
/// non-empty list wins, names joined with ", ".
fn resolve_author(entry: &Entry) -> Option<String> {
    [&entry.authors, &entry.contributors]
        .into_iter()
        .find(|people| !people.is_empty())
        .map(|people| {
            people
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
}

fn resolve_categories(entry: &Entry) -> Vec<String> {
    entry
        .categories
        .iter()
        .map(|c| c.label.clone().unwrap_or_else(|| c.term.clone()))
        .collect()
}

/// Enclosure URL when the item carries one, with media thumbnails as a
/// fallback.
fn resolve_image(entry: &Entry) -> Option<String> {
    entry
        .media
        .iter()
        .flat_map(|m| m.content.iter())
        .find_map(|c| c.url.as_ref().map(|u| u.to_string()))
        .or_else(|| {
            entry
                .media
                .iter()
                .flat_map(|m| m.thumbnails.iter())
                .map(|t| t.image.uri.clone())
                .next()
        })
}
