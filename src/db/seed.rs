// Default source list for `ground seed`.
//
// Seeding is idempotent: sources whose name already exists are skipped.

use anyhow::Result;
use tracing::info;

use super::models::NewSource;
use super::Database;

/// (name, site url, feed url, bias rating -10..10, reliability 0..10)
const DEFAULT_SOURCES: &[(&str, &str, &str, f64, f64)] = &[
    (
        "The Hindu",
        "https://www.thehindu.com",
        "https://www.thehindu.com/news/national/feeder/default.rss",
        -2.5,
        8.5,
    ),
    (
        "NDTV",
        "https://www.ndtv.com",
        "https://feeds.feedburner.com/ndtvnews-top-stories",
        -1.5,
        8.0,
    ),
    (
        "Indian Express",
        "https://indianexpress.com",
        "https://indianexpress.com/feed/",
        -1.0,
        8.2,
    ),
    (
        "Times of India",
        "https://timesofindia.indiatimes.com",
        "https://timesofindia.indiatimes.com/rssfeedstopstories.cms",
        1.0,
        7.5,
    ),
    (
        "Hindustan Times",
        "https://www.hindustantimes.com",
        "https://www.hindustantimes.com/feeds/rss/india-news/rssfeed.xml",
        0.5,
        7.8,
    ),
    (
        "India Today",
        "https://www.indiatoday.in",
        "https://www.indiatoday.in/rss/home",
        0.0,
        7.7,
    ),
    (
        "News18",
        "https://www.news18.com",
        "https://www.news18.com/rss/india.xml",
        2.0,
        7.2,
    ),
    (
        "Zee News",
        "https://zeenews.india.com",
        "https://zeenews.india.com/rss/india-national-news.xml",
        3.5,
        7.0,
    ),
    (
        "The Hindu - Sports",
        "https://www.thehindu.com/sport",
        "https://www.thehindu.com/sport/feeder/default.rss",
        0.0,
        8.5,
    ),
    (
        "NDTV Sports",
        "https://sports.ndtv.com",
        "https://feeds.feedburner.com/ndtvsports-latest",
        0.0,
        8.0,
    ),
    (
        "Times of India - Sports",
        "https://timesofindia.indiatimes.com/sports",
        "https://timesofindia.indiatimes.com/rssfeeds/4719148.cms",
        0.0,
        7.5,
    ),
    (
        "India Today - Sports",
        "https://www.indiatoday.in/sports",
        "https://www.indiatoday.in/rss/1206578",
        0.0,
        7.7,
    ),
    (
        "Moneycontrol",
        "https://www.moneycontrol.com",
        "https://www.moneycontrol.com/rss/latestnews.xml",
        0.5,
        8.0,
    ),
    (
        "Economic Times",
        "https://economictimes.indiatimes.com",
        "https://economictimes.indiatimes.com/rssfeedstopstories.cms",
        1.5,
        8.2,
    ),
    (
        "Times of India - Entertainment",
        "https://timesofindia.indiatimes.com/entertainment",
        "https://timesofindia.indiatimes.com/rssfeeds/1081479906.cms",
        0.0,
        7.0,
    ),
];

/// The built-in source list as insertable rows.
pub fn default_sources() -> Vec<NewSource> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, url, feed, bias, reliability)| NewSource {
            name: name.to_string(),
            url: url.to_string(),
            feed_url: Some(feed.to_string()),
            logo_url: None,
            bias_rating: Some(*bias),
            reliability_rating: Some(*reliability),
            is_active: true,
        })
        .collect()
}

/// Insert any default sources that aren't present yet.
///
/// Returns (created, skipped).
pub async fn seed_sources(db: &dyn Database) -> Result<(usize, usize)> {
    let mut created = 0;
    let mut skipped = 0;
    for source in default_sources() {
        if db.find_source_by_name(&source.name).await?.is_some() {
            skipped += 1;
            continue;
        }
        db.create_source(&source).await?;
        info!(name = %source.name, "Created source");
        created += 1;
    }
    Ok((created, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteDatabase;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = SqliteDatabase::in_memory().unwrap();
        let (created, skipped) = seed_sources(&db).await.unwrap();
        assert_eq!(created, DEFAULT_SOURCES.len());
        assert_eq!(skipped, 0);

        let (created, skipped) = seed_sources(&db).await.unwrap();
        assert_eq!(created, 0);
        assert_eq!(skipped, DEFAULT_SOURCES.len());

        assert_eq!(
            db.list_feed_sources().await.unwrap().len(),
            DEFAULT_SOURCES.len()
        );
    }
}
