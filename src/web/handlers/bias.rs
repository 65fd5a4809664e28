// GET /api/v1/bias?score=: label and split for an arbitrary score.
//
// Without ?score= (or with an empty one) the answer is the "unknown" view:
// Center with the default 10/80/10 split.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::bias::BiasView;
use crate::web::api_error;

#[derive(Deserialize)]
pub struct BiasQuery {
    score: Option<String>,
}

pub async fn describe_score(Query(params): Query<BiasQuery>) -> Response {
    let score = match params.score.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(s) if s.is_finite() => Some(s),
            _ => return api_error(StatusCode::UNPROCESSABLE_ENTITY, "score must be a finite number"),
        },
    };
    Json(BiasView::from_score(score)).into_response()
}
