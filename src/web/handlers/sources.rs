// Source handlers.
//
// GET  /api/v1/sources/ : public, ?skip= ?limit=
// POST /api/v1/sources/ : superuser only

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::db::models::NewSource;
use crate::web::auth::authenticate_superuser;
use crate::web::{api_error, internal_error, AppState};

#[derive(Deserialize)]
pub struct SourcesQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

pub async fn list_sources(
    State(state): State<AppState>,
    Query(params): Query<SourcesQuery>,
) -> Response {
    match state.db.list_sources(params.skip, params.limit.min(1000)).await {
        Ok(sources) => Json(sources).into_response(),
        Err(e) => internal_error("Failed to list sources", e),
    }
}

pub async fn create_source(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NewSource>,
) -> Response {
    let user = match authenticate_superuser(&state, &headers).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };

    if body.name.trim().is_empty() || body.url.trim().is_empty() {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, "Source name and url are required");
    }

    match state.db.create_source(&body).await {
        Ok(source) => {
            info!(source = %source.name, by = %user.email, "Source created");
            Json(source).into_response()
        }
        Err(e) => internal_error("Failed to create source", e),
    }
}
