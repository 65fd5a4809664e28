// Database queries: CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::Result;
use chrono::SecondsFormat;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Article, ArticleQuery, NewArticle, NewSource, Source, StoreStats, User};

// --- Fetch state ---

/// Get a state value by key (e.g., "last_fetch_at").
pub fn get_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM fetch_state WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a state value (upsert).
pub fn set_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO fetch_state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

// --- Sources ---

const SOURCE_COLUMNS: &str =
    "id, name, url, feed_url, logo_url, bias_rating, reliability_rating, is_active";

fn source_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Source> {
    Ok(Source {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        url: row.get(offset + 2)?,
        feed_url: row.get(offset + 3)?,
        logo_url: row.get(offset + 4)?,
        bias_rating: row.get(offset + 5)?,
        reliability_rating: row.get(offset + 6)?,
        is_active: row.get(offset + 7)?,
    })
}

pub fn create_source(conn: &Connection, source: &NewSource) -> Result<Source> {
    conn.execute(
        "INSERT INTO sources (name, url, feed_url, logo_url, bias_rating, reliability_rating, is_active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            source.name,
            source.url,
            source.feed_url,
            source.logo_url,
            source.bias_rating.unwrap_or(0.0),
            source.reliability_rating.unwrap_or(5.0),
            source.is_active,
        ],
    )?;
    let id = conn.last_insert_rowid();
    let sql = format!("SELECT {SOURCE_COLUMNS} FROM sources WHERE id = ?1");
    let created = conn.query_row(&sql, params![id], |row| source_from_row(row, 0))?;
    Ok(created)
}

pub fn list_sources(conn: &Connection, skip: u32, limit: u32) -> Result<Vec<Source>> {
    let sql = format!("SELECT {SOURCE_COLUMNS} FROM sources ORDER BY id LIMIT ?1 OFFSET ?2");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit, skip], |row| source_from_row(row, 0))?;

    let mut sources = Vec::new();
    for row in rows {
        sources.push(row?);
    }
    Ok(sources)
}

/// Active sources that have a feed to poll.
pub fn list_feed_sources(conn: &Connection) -> Result<Vec<Source>> {
    let sql = format!(
        "SELECT {SOURCE_COLUMNS} FROM sources
         WHERE is_active = 1 AND feed_url IS NOT NULL AND feed_url != ''
         ORDER BY id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| source_from_row(row, 0))?;

    let mut sources = Vec::new();
    for row in rows {
        sources.push(row?);
    }
    Ok(sources)
}

pub fn find_source_by_name(conn: &Connection, name: &str) -> Result<Option<Source>> {
    let sql = format!("SELECT {SOURCE_COLUMNS} FROM sources WHERE name = ?1");
    let result = conn
        .query_row(&sql, params![name], |row| source_from_row(row, 0))
        .optional()?;
    Ok(result)
}

// --- Articles ---

const ARTICLE_SELECT: &str = "
    SELECT a.id, a.title, a.summary, a.url, a.published_at, a.image_url,
           a.category, a.bias_score, a.source_id,
           s.id, s.name, s.url, s.feed_url, s.logo_url, s.bias_rating,
           s.reliability_rating, s.is_active
    FROM articles a
    LEFT JOIN sources s ON s.id = a.source_id";

fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    // Source columns are all NULL when the join found nothing.
    let source_id: Option<i64> = row.get(9)?;
    let source = match source_id {
        Some(_) => Some(source_from_row(row, 9)?),
        None => None,
    };
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        url: row.get(3)?,
        published_at: row.get(4)?,
        image_url: row.get(5)?,
        category: row.get(6)?,
        bias_score: row.get(7)?,
        source_id: row.get(8)?,
        source,
    })
}

/// Insert an article. Returns `None` when the URL is already stored.
pub fn insert_article(conn: &Connection, article: &NewArticle) -> Result<Option<i64>> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO articles
            (title, summary, url, published_at, image_url, category, bias_score, source_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            article.title,
            article.summary,
            article.url,
            article
                .published_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            article.image_url,
            article.category,
            article.bias_score,
            article.source_id,
        ],
    )?;
    if inserted == 0 {
        return Ok(None);
    }
    Ok(Some(conn.last_insert_rowid()))
}

/// Articles newest first, optionally filtered by category and source.
pub fn list_articles(conn: &Connection, query: &ArticleQuery) -> Result<Vec<Article>> {
    let sql = format!(
        "{ARTICLE_SELECT}
         WHERE (?1 IS NULL OR a.category = ?1)
           AND (?2 IS NULL OR a.source_id = ?2)
         ORDER BY a.published_at DESC, a.id DESC
         LIMIT ?3 OFFSET ?4"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![query.category, query.source_id, query.limit, query.skip],
        article_from_row,
    )?;

    let mut articles = Vec::new();
    for row in rows {
        articles.push(row?);
    }
    Ok(articles)
}

pub fn get_article(conn: &Connection, id: i64) -> Result<Option<Article>> {
    let sql = format!("{ARTICLE_SELECT} WHERE a.id = ?1");
    let result = conn.query_row(&sql, params![id], article_from_row).optional()?;
    Ok(result)
}

// --- Users ---

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        hashed_password: row.get(2)?,
        is_active: row.get(3)?,
        is_superuser: row.get(4)?,
    })
}

/// Look up a user by email (case-insensitive).
pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let result = conn
        .query_row(
            "SELECT id, email, hashed_password, is_active, is_superuser
             FROM users WHERE email = ?1",
            params![email],
            user_from_row,
        )
        .optional()?;
    Ok(result)
}

/// Insert a user unless the email (compared case-insensitively) is taken.
pub fn create_user(
    conn: &Connection,
    email: &str,
    hashed_password: &str,
    is_superuser: bool,
) -> Result<Option<User>> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO users (email, hashed_password, is_active, is_superuser)
         VALUES (?1, ?2, 1, ?3)",
        params![email, hashed_password, is_superuser],
    )?;
    if inserted == 0 {
        return Ok(None);
    }
    let id = conn.last_insert_rowid();
    let user = conn.query_row(
        "SELECT id, email, hashed_password, is_active, is_superuser FROM users WHERE id = ?1",
        params![id],
        user_from_row,
    )?;
    Ok(Some(user))
}

// --- Stats ---

pub fn stats(conn: &Connection) -> Result<StoreStats> {
    let count = |sql: &str| -> Result<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    let newest_article_at: Option<String> =
        conn.query_row("SELECT MAX(published_at) FROM articles", [], |row| row.get(0))?;

    let mut stmt = conn.prepare(
        "SELECT COALESCE(category, 'General'), COUNT(*) FROM articles
         GROUP BY 1 ORDER BY 2 DESC, 1",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut categories = Vec::new();
    for row in rows {
        categories.push(row?);
    }

    Ok(StoreStats {
        sources: count("SELECT COUNT(*) FROM sources")?,
        feed_sources: count(
            "SELECT COUNT(*) FROM sources WHERE is_active = 1 AND feed_url IS NOT NULL AND feed_url != ''",
        )?,
        articles: count("SELECT COUNT(*) FROM articles")?,
        users: count("SELECT COUNT(*) FROM users")?,
        newest_article_at,
        categories,
    })
}
