// Database trait: async interface for all DB operations.
//
// The web handlers and the ingest pipeline hold an `Arc<dyn Database>`.
// Methods are async so the blocking rusqlite work sits behind a mutex in the
// implementation and callers never touch a Connection directly.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Article, ArticleQuery, NewArticle, NewSource, Source, StoreStats, User};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Row counts and freshness for status displays.
    async fn stats(&self) -> Result<StoreStats>;

    // --- Fetch state ---

    async fn get_state(&self, key: &str) -> Result<Option<String>>;

    async fn set_state(&self, key: &str, value: &str) -> Result<()>;

    // --- Sources ---

    async fn list_sources(&self, skip: u32, limit: u32) -> Result<Vec<Source>>;

    /// Active sources with a feed URL.
    async fn list_feed_sources(&self) -> Result<Vec<Source>>;

    async fn create_source(&self, source: &NewSource) -> Result<Source>;

    async fn find_source_by_name(&self, name: &str) -> Result<Option<Source>>;

    // --- Articles ---

    /// Newest first, filtered and paged by `query`.
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>>;

    async fn get_article(&self, id: i64) -> Result<Option<Article>>;

    /// Insert unless the URL is already stored. Returns the new id.
    async fn insert_article(&self, article: &NewArticle) -> Result<Option<i64>>;

    // --- Users ---

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a user. Returns `None` when the email is already taken.
    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
        is_superuser: bool,
    ) -> Result<Option<User>>;
}
