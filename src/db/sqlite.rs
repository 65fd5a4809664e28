// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Article, ArticleQuery, NewArticle, NewSource, Source, StoreStats, User};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Fresh in-memory database with the schema applied. Used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock().await;
        super::queries::stats(&conn)
    }

    async fn get_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_state(&conn, key)
    }

    async fn set_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_state(&conn, key, value)
    }

    async fn list_sources(&self, skip: u32, limit: u32) -> Result<Vec<Source>> {
        let conn = self.conn.lock().await;
        super::queries::list_sources(&conn, skip, limit)
    }

    async fn list_feed_sources(&self) -> Result<Vec<Source>> {
        let conn = self.conn.lock().await;
        super::queries::list_feed_sources(&conn)
    }

    async fn create_source(&self, source: &NewSource) -> Result<Source> {
        let conn = self.conn.lock().await;
        super::queries::create_source(&conn, source)
    }

    async fn find_source_by_name(&self, name: &str) -> Result<Option<Source>> {
        let conn = self.conn.lock().await;
        super::queries::find_source_by_name(&conn, name)
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let conn = self.conn.lock().await;
        super::queries::list_articles(&conn, query)
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let conn = self.conn.lock().await;
        super::queries::get_article(&conn, id)
    }

    async fn insert_article(&self, article: &NewArticle) -> Result<Option<i64>> {
        let conn = self.conn.lock().await;
        super::queries::insert_article(&conn, article)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_email(&conn, email)
    }

    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
        is_superuser: bool,
    ) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::create_user(&conn, email, hashed_password, is_superuser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trait_state_roundtrip() {
        let db = SqliteDatabase::in_memory().unwrap();
        assert_eq!(db.get_state("last_fetch_at").await.unwrap(), None);
        db.set_state("last_fetch_at", "2024-01-01").await.unwrap();
        assert_eq!(
            db.get_state("last_fetch_at").await.unwrap(),
            Some("2024-01-01".to_string())
        );
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = SqliteDatabase::in_memory().unwrap();
        assert_eq!(db.table_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_trait_source_lookup_by_name() {
        let db = SqliteDatabase::in_memory().unwrap();
        let source = NewSource {
            name: "NDTV".to_string(),
            url: "https://www.ndtv.com".to_string(),
            feed_url: None,
            logo_url: None,
            bias_rating: None,
            reliability_rating: None,
            is_active: true,
        };
        db.create_source(&source).await.unwrap();
        assert!(db.find_source_by_name("NDTV").await.unwrap().is_some());
        assert!(db.find_source_by_name("BBC").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trait_user_roundtrip() {
        let db = SqliteDatabase::in_memory().unwrap();
        db.create_user("a@b.c", "hash", true).await.unwrap();
        let user = db.get_user_by_email("a@b.c").await.unwrap().unwrap();
        assert!(user.is_superuser);
        assert_eq!(user.hashed_password, "hash");
    }
}
