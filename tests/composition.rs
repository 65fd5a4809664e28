// Composition tests: verifying that the ingest stages chain together.
//
// These tests exercise the data flow between modules:
//   feed XML -> parse -> categorise + score -> store -> query -> bias view
// against an in-memory SQLite database, with no network calls.

use chrono::{TimeZone, Utc};

use ground::bias::BiasLabel;
use ground::db::models::{ArticleQuery, ArticleView};
use ground::db::seed::{default_sources, seed_sources};
use ground::db::{Database, SqliteDatabase};
use ground::feeds::parse::parse_feed_at;
use ground::pipeline::ingest::store_entries;

const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Example Daily</title>
  <item>
    <title>Parliament debates election reform bill</title>
    <link>https://example.in/politics/1</link>
    <description>Opposition calls for minority rights and social justice</description>
    <pubDate>Fri, 01 Mar 2024 06:00:00 GMT</pubDate>
  </item>
  <item>
    <title>Sensex climbs as rupee strengthens</title>
    <link>https://example.in/markets/2</link>
    <description>Investors cheer tax cuts and privatization push</description>
    <pubDate>Fri, 01 Mar 2024 08:00:00 GMT</pubDate>
  </item>
  <item>
    <title>Monsoon forecast for the week</title>
    <link>https://example.in/weather/3</link>
    <pubDate>Fri, 01 Mar 2024 07:00:00 GMT</pubDate>
  </item>
</channel></rss>"#;

async fn seeded_db() -> (SqliteDatabase, i64) {
    let db = SqliteDatabase::in_memory().unwrap();
    let (created, skipped) = seed_sources(&db).await.unwrap();
    assert_eq!((created, skipped), (default_sources().len(), 0));
    let source = db.list_feed_sources().await.unwrap().remove(0);
    (db, source.id)
}

async fn ingest_feed(db: &SqliteDatabase, source_id: i64) {
    let source = db
        .list_sources(0, 100)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.id == source_id)
        .unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let entries = parse_feed_at(FEED, now);
    assert_eq!(entries.len(), 3);
    let (inserted, duplicates, _) = store_entries(db, &source, entries, 50).await;
    assert_eq!((inserted, duplicates), (3, 0));
}

// ============================================================
// Chain: parse -> store -> list
// ============================================================

#[tokio::test]
async fn ingested_articles_come_back_newest_first_with_source() {
    let (db, source_id) = seeded_db().await;
    ingest_feed(&db, source_id).await;

    let articles = db.list_articles(&ArticleQuery::default()).await.unwrap();
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Sensex climbs as rupee strengthens",
            "Monsoon forecast for the week",
            "Parliament debates election reform bill",
        ]
    );
    assert!(articles
        .iter()
        .all(|a| a.source.as_ref().map(|s| s.id) == Some(source_id)));
    assert_eq!(articles[0].published_at, "2024-03-01T08:00:00Z");
}

#[tokio::test]
async fn ingested_articles_are_categorised_and_scored() {
    let (db, source_id) = seeded_db().await;
    ingest_feed(&db, source_id).await;

    let query = ArticleQuery {
        category: Some("Politics".to_string()),
        ..Default::default()
    };
    let politics = db.list_articles(&query).await.unwrap();
    assert_eq!(politics.len(), 1);

    // two left indicators, dampened by one neutral ("debate"): -100 * 0.9
    let view = ArticleView::from(politics[0].clone());
    assert_eq!(view.bias.score, Some(-90.0));
    assert_eq!(view.bias.label, BiasLabel::Left);
    assert!((view.bias.split.left - 95.0).abs() < 1e-9);

    let business = db
        .list_articles(&ArticleQuery {
            category: Some("Business".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(business.len(), 1);
    assert_eq!(business[0].bias().label, BiasLabel::Right);

    let general = db
        .list_articles(&ArticleQuery {
            category: Some("General".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(general.len(), 1);
    assert_eq!(general[0].summary, None);
    assert_eq!(general[0].bias().label, BiasLabel::Center);
}

#[tokio::test]
async fn refetching_the_same_feed_stores_nothing_new() {
    let (db, source_id) = seeded_db().await;
    ingest_feed(&db, source_id).await;

    let source = db.list_feed_sources().await.unwrap().remove(0);
    let entries = parse_feed_at(FEED, Utc::now());
    let (inserted, duplicates, seen) = store_entries(&db, &source, entries, 50).await;
    assert_eq!((inserted, duplicates, seen), (0, 3, 3));

    let stats = db.stats().await.unwrap();
    assert_eq!(stats.articles, 3);
    assert_eq!(stats.sources as usize, default_sources().len());
    assert_eq!(stats.newest_article_at.as_deref(), Some("2024-03-01T08:00:00Z"));
}

#[tokio::test]
async fn paging_and_source_filter() {
    let (db, source_id) = seeded_db().await;
    ingest_feed(&db, source_id).await;

    let page = db
        .list_articles(&ArticleQuery {
            skip: 1,
            limit: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "Monsoon forecast for the week");

    let other_source = db
        .list_articles(&ArticleQuery {
            source_id: Some(source_id + 1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(other_source.is_empty());
}
