// Web server: Axum-based JSON API under /api/v1.
//
// Serves articles (with derived bias label and split), sources, accounts,
// live scores and on-demand feed fetching. Reader clients (the terminal
// commands, or any front end) talk to these routes.
//
// Auth: stateless HMAC-signed bearer tokens. No session table in the DB.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;

pub mod auth;
pub mod fetch_job;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    pub fetch_status: Arc<RwLock<fetch_job::FetchStatus>>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn Database>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            fetch_status: Arc::new(RwLock::new(fetch_job::FetchStatus::default())),
        }
    }
}

/// Start the Axum web server and block until it exits.
///
/// With `schedule` set, feeds are also fetched every
/// `fetch_interval_secs` in the background.
pub async fn run_server(
    config: Config,
    db: Arc<dyn Database>,
    port: u16,
    bind: &str,
    schedule: bool,
) -> Result<()> {
    config.require_secret()?;

    let state = AppState::new(config, db);

    if schedule {
        let interval = Duration::from_secs(state.config.fetch_interval_secs.max(60));
        fetch_job::spawn_scheduler(state.clone(), interval);
    }

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Ground API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    // Signed-in users
    let user_api = Router::new()
        .route("/api/v1/users/me", get(handlers::users::read_me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    // Superusers only
    let admin_api = Router::new()
        .route("/api/v1/fetch", post(handlers::fetch::trigger_fetch))
        .route("/api/v1/fetch/status", get(handlers::fetch::fetch_status))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_superuser,
        ));

    // Public routes. POST /sources/ checks credentials in the handler since
    // it shares a path with the public listing.
    let public_api = Router::new()
        .route("/health", get(health))
        .route("/api/v1/articles/", get(handlers::articles::list_articles))
        .route("/api/v1/articles/{id}", get(handlers::articles::get_article))
        .route(
            "/api/v1/sources/",
            get(handlers::sources::list_sources).post(handlers::sources::create_source),
        )
        .route("/api/v1/login/access-token", post(handlers::login::access_token))
        .route("/api/v1/users/signup", post(handlers::users::signup))
        .route("/api/v1/sports/live-scores", get(handlers::sports::live_scores))
        .route("/api/v1/sports/live-scores/demo", get(handlers::sports::demo_scores))
        .route("/api/v1/bias", get(handlers::bias::describe_score));

    Router::new()
        .merge(user_api)
        .merge(admin_api)
        .merge(public_api)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn not_found() -> Response {
    api_error(StatusCode::NOT_FOUND, "Not Found")
}

/// JSON error response: `{"detail": message}`.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "detail": message }))).into_response()
}

/// Log an internal error and hide it behind a 500.
pub fn internal_error(context: &str, error: anyhow::Error) -> Response {
    tracing::error!(error = %error, "{context}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
