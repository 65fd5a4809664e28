// Ingest pipeline: fetch every feed -> categorise -> score bias -> store.
//
// This is the workflow behind `ground fetch` and the server's scheduled job.
// For each active source with a feed URL it:
// 1. Downloads and parses the feed (several feeds in flight at once)
// 2. Takes the newest `max_entries` entries
// 3. Assigns a category and a keyword bias score to each entry
// 4. Inserts the article, skipping URLs already stored
// 5. Records when the run finished

use anyhow::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bias::{self, analyzer};
use crate::categorize::categorize;
use crate::db::models::{NewArticle, Source};
use crate::db::Database;
use crate::feeds::{parse_feed, FeedClient, FeedEntry};

/// Key in the fetch-state table holding the last completed run (RFC 3339).
pub const LAST_FETCH_KEY: &str = "last_fetch_at";

pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_MAX_ENTRIES: usize = 50;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Feeds downloaded at once
    pub concurrency: usize,
    /// Entries taken from the top of each feed
    pub max_entries: usize,
    /// Draw a progress bar (CLI only)
    pub show_progress: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            max_entries: DEFAULT_MAX_ENTRIES,
            show_progress: false,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestSummary {
    pub feeds: usize,
    pub entries_seen: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub failed_feeds: usize,
}

/// Fetch all feeds and store new articles.
///
/// Feed-level and entry-level failures are logged and counted; only store
/// errors that prevent recording the run abort it.
pub async fn run(
    db: &dyn Database,
    client: &FeedClient,
    options: &IngestOptions,
) -> Result<IngestSummary> {
    let sources = db.list_feed_sources().await?;
    let mut summary = IngestSummary {
        feeds: sources.len(),
        ..Default::default()
    };

    info!(feeds = sources.len(), "Fetching feeds");

    let pb = if options.show_progress {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Fetching [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    // Phase 1: download and parse in parallel
    let fetched: Vec<(Source, Result<Vec<FeedEntry>>)> = stream::iter(sources.into_iter().map(
        |source| async move {
            let result = match source.feed_url.as_deref() {
                Some(url) => client.fetch(url).await.map(|body| parse_feed(&body)),
                None => Ok(Vec::new()),
            };
            (source, result)
        },
    ))
    .buffer_unordered(options.concurrency.max(1))
    .collect()
    .await;

    // Phase 2: write sequentially, one feed at a time
    for (source, result) in fetched {
        pb.set_message(source.name.clone());
        match result {
            Ok(entries) => {
                let (inserted, duplicates, seen) =
                    store_entries(db, &source, entries, options.max_entries).await;
                summary.entries_seen += seen;
                summary.inserted += inserted;
                summary.duplicates += duplicates;
                info!(source = %source.name, inserted, duplicates, "Feed stored");
            }
            Err(e) => {
                summary.failed_feeds += 1;
                warn!(source = %source.name, error = %e, "Failed to fetch feed, skipping");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    db.set_state(LAST_FETCH_KEY, &Utc::now().to_rfc3339()).await?;

    info!(
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        failed_feeds = summary.failed_feeds,
        "Fetch complete"
    );
    Ok(summary)
}

/// Categorise, score and insert up to `max_entries` entries of one feed.
///
/// Returns (inserted, duplicates, entries considered).
pub async fn store_entries(
    db: &dyn Database,
    source: &Source,
    entries: Vec<FeedEntry>,
    max_entries: usize,
) -> (usize, usize, usize) {
    let mut inserted = 0;
    let mut duplicates = 0;
    let mut seen = 0;

    for entry in entries.into_iter().take(max_entries) {
        seen += 1;
        let article = to_new_article(entry, source.id);
        match db.insert_article(&article).await {
            Ok(Some(_)) => {
                debug!(
                    category = %article.category,
                    bias = %bias::classify(Some(article.bias_score)),
                    title = %article.title,
                    "Saved article"
                );
                inserted += 1;
            }
            Ok(None) => duplicates += 1,
            Err(e) => {
                warn!(url = %article.url, error = %e, "Failed to store article, skipping");
            }
        }
    }

    (inserted, duplicates, seen)
}

/// Turn a parsed feed entry into a scored, categorised article row.
pub fn to_new_article(entry: FeedEntry, source_id: i64) -> NewArticle {
    let category = categorize(&entry.title, &entry.summary);
    let bias_score = analyzer::score_text(&entry.title, &entry.summary);
    NewArticle {
        category: category.as_str().to_string(),
        bias_score,
        summary: (!entry.summary.is_empty()).then_some(entry.summary),
        title: entry.title,
        url: entry.link,
        published_at: entry.published_at,
        image_url: entry.image_url,
        source_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ArticleQuery, NewSource};
    use crate::db::SqliteDatabase;
    use chrono::TimeZone;

    fn entry(title: &str, link: &str, summary: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: link.to_string(),
            summary: summary.to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap(),
            image_url: None,
        }
    }

    async fn db_with_source() -> (SqliteDatabase, Source) {
        let db = SqliteDatabase::in_memory().unwrap();
        let source = db
            .create_source(&NewSource {
                name: "Example Times".to_string(),
                url: "https://example.com".to_string(),
                feed_url: Some("https://example.com/rss".to_string()),
                logo_url: None,
                bias_rating: None,
                reliability_rating: None,
                is_active: true,
            })
            .await
            .unwrap();
        (db, source)
    }

    #[test]
    fn test_to_new_article_scores_and_categorises() {
        let article = to_new_article(
            entry(
                "Cricket team wins championship",
                "https://example.com/a",
                "",
            ),
            7,
        );
        assert_eq!(article.category, "Sports");
        assert_eq!(article.bias_score, 0.0);
        assert_eq!(article.summary, None);
        assert_eq!(article.source_id, 7);
    }

    #[tokio::test]
    async fn test_store_entries_skips_duplicates() {
        let (db, source) = db_with_source().await;
        let entries = vec![
            entry("First", "https://example.com/1", "Election results"),
            entry("Second", "https://example.com/2", ""),
            entry("First again", "https://example.com/1", ""),
        ];

        let (inserted, duplicates, seen) = store_entries(&db, &source, entries, 50).await;
        assert_eq!((inserted, duplicates, seen), (2, 1, 3));

        let stored = db.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|a| a.source_id == Some(source.id)));
    }

    #[tokio::test]
    async fn test_store_entries_respects_max() {
        let (db, source) = db_with_source().await;
        let entries: Vec<FeedEntry> = (0..10)
            .map(|i| entry("Story", &format!("https://example.com/{i}"), ""))
            .collect();

        let (inserted, _, seen) = store_entries(&db, &source, entries, 3).await;
        assert_eq!((inserted, seen), (3, 3));
    }

    #[tokio::test]
    async fn test_run_with_no_feeds_records_timestamp() {
        let db = SqliteDatabase::in_memory().unwrap();
        let client = FeedClient::new().unwrap();

        let summary = run(&db, &client, &IngestOptions::default()).await.unwrap();
        assert_eq!(summary, IngestSummary::default());
        assert!(db.get_state(LAST_FETCH_KEY).await.unwrap().is_some());
    }
}
