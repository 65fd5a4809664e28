// Article list and detail handlers.
//
// GET /api/v1/articles/     : newest first, ?skip= ?limit= ?category= ?source_id=
// GET /api/v1/articles/{id} : single article
//
// Every article carries a `bias` object (score, label, split) derived from
// the stored score, so clients never classify on their own.
//
// ?category= accepts either the stored name ("Business") or the navigation
// label ("Business & Markets"); "All" means no filter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::categorize::CategoryFilter;
use crate::db::models::{ArticleQuery, ArticleView};
use crate::web::{api_error, internal_error, AppState};

const MAX_LIMIT: u32 = 1000;

/// Map a navigation label to the stored category name.
fn normalize_category(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    match CategoryFilter::parse(&raw) {
        Some(filter) => filter.category().map(|c| c.as_str().to_string()),
        None => Some(raw),
    }
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(mut query): Query<ArticleQuery>,
) -> Response {
    query.limit = query.limit.min(MAX_LIMIT);
    query.category = normalize_category(query.category.take());

    match state.db.list_articles(&query).await {
        Ok(articles) => {
            let views: Vec<ArticleView> = articles.into_iter().map(ArticleView::from).collect();
            Json(views).into_response()
        }
        Err(e) => internal_error("Failed to list articles", e),
    }
}

pub async fn get_article(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.db.get_article(id).await {
        Ok(Some(article)) => Json(ArticleView::from(article)).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Article not found"),
        Err(e) => internal_error("Failed to load article", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(None), None);
        assert_eq!(normalize_category(Some("All".to_string())), None);
        assert_eq!(
            normalize_category(Some("Business & Markets".to_string())),
            Some("Business".to_string())
        );
        assert_eq!(
            normalize_category(Some("politics".to_string())),
            Some("Politics".to_string())
        );
        assert_eq!(
            normalize_category(Some("Astrology".to_string())),
            Some("Astrology".to_string())
        );
    }
}
