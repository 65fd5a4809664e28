// POST /api/v1/fetch: trigger a background feed fetch (superuser).
//
// Returns 202 Accepted if the fetch starts.
// Returns 409 Conflict if a fetch is already running.
//
// GET /api/v1/fetch/status reports progress and the last run's summary,
// together with the stored last_fetch_at.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pipeline::ingest::LAST_FETCH_KEY;
use crate::web::fetch_job::{launch_fetch, try_begin};
use crate::web::{api_error, internal_error, AppState};

pub async fn trigger_fetch(State(state): State<AppState>) -> Response {
    if !try_begin(&state.fetch_status).await {
        return api_error(StatusCode::CONFLICT, "A fetch is already running");
    }

    launch_fetch(
        state.config.clone(),
        state.db.clone(),
        state.fetch_status.clone(),
    );

    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "message": "Fetch started" })),
    )
        .into_response()
}

pub async fn fetch_status(State(state): State<AppState>) -> Response {
    let last_fetch_at = match state.db.get_state(LAST_FETCH_KEY).await {
        Ok(value) => value,
        Err(e) => return internal_error("Failed to read last fetch time", e),
    };
    let status = state.fetch_status.read().await.clone();

    Json(serde_json::json!({
        "running": status.running,
        "started_at": status.started_at,
        "finished_at": status.finished_at,
        "last_summary": status.last_summary,
        "last_error": status.last_error,
        "last_fetch_at": last_fetch_at,
    }))
    .into_response()
}
