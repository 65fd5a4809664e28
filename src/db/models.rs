// Data models: Rust structs that map to database rows.
//
// These are the types that flow through the application and over the API.
// They're separate from the queries so other modules (the API client in
// particular) can use them without depending on rusqlite.

use serde::{Deserialize, Serialize};

use crate::bias::BiasView;

/// A news outlet with an optional RSS/Atom feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub feed_url: Option<String>,
    pub logo_url: Option<String>,
    /// Coarse outlet lean, -10 (left) to 10 (right)
    pub bias_rating: Option<f64>,
    /// 0 to 10
    pub reliability_rating: Option<f64>,
    pub is_active: bool,
}

/// Fields needed to create a source. Defaults mirror the column defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSource {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub bias_rating: Option<f64>,
    #[serde(default)]
    pub reliability_rating: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// A stored article with its source joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub url: String,
    /// RFC 3339, UTC
    pub published_at: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// -100 (left) to +100 (right)
    pub bias_score: Option<f64>,
    pub source_id: Option<i64>,
    pub source: Option<Source>,
}

impl Article {
    /// Bias label and split derived from the stored score.
    pub fn bias(&self) -> BiasView {
        BiasView::from_score(self.bias_score)
    }
}

/// An article as served by the API: the row plus its derived bias view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub bias: BiasView,
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        let bias = article.bias();
        Self { article, bias }
    }
}

/// An article ready for insertion (produced by the ingest pipeline).
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub summary: Option<String>,
    pub url: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub image_url: Option<String>,
    pub category: String,
    pub bias_score: f64,
    pub source_id: i64,
}

/// Filters and paging for the article list.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub category: Option<String>,
    pub source_id: Option<i64>,
}

fn default_limit() -> u32 {
    100
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            category: None,
            source_id: None,
        }
    }
}

/// A registered user. `hashed_password` never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// The public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<&User> for UserRead {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_active: user.is_active,
            is_superuser: user.is_superuser,
        }
    }
}

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Row counts and freshness for `ground status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub sources: i64,
    pub feed_sources: i64,
    pub articles: i64,
    pub users: i64,
    pub newest_article_at: Option<String>,
    /// (category, article count), largest first
    pub categories: Vec<(String, i64)>,
}
