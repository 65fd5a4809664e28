// News feed access: download and parse RSS 2.0 and Atom feeds.

pub mod client;
pub mod parse;

use chrono::{DateTime, Utc};

pub use client::FeedClient;
pub use parse::parse_feed;

/// One story pulled from a feed, already cleaned up for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Plain-text summary, markup stripped. Empty when the feed has none.
    pub summary: String,
    pub published_at: DateTime<Utc>,
    pub image_url: Option<String>,
}
