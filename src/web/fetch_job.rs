// Background fetch job: runs the ingest pipeline on demand (POST /api/v1/fetch)
// and on a fixed interval while the server is up.
//
// Only one fetch runs at a time. A scheduled tick that lands while a manual
// fetch is still going is skipped, and POST /api/v1/fetch answers 409.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::AppState;
use crate::config::Config;
use crate::db::Database;
use crate::feeds::FeedClient;
use crate::pipeline::ingest::{self, IngestOptions, IngestSummary};

/// Live status of the background fetch, exposed via GET /api/v1/fetch/status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchStatus {
    /// True while a fetch is in progress.
    pub running: bool,
    /// RFC 3339 time the current/last fetch started.
    pub started_at: Option<String>,
    /// RFC 3339 time the last fetch finished.
    pub finished_at: Option<String>,
    pub last_summary: Option<IngestSummary>,
    /// Error message from the last fetch, if it failed.
    pub last_error: Option<String>,
}

/// Mark a fetch as started. Returns false if one is already running.
pub async fn try_begin(fetch_status: &RwLock<FetchStatus>) -> bool {
    let mut status = fetch_status.write().await;
    if status.running {
        return false;
    }
    status.running = true;
    status.started_at = Some(Utc::now().to_rfc3339());
    status.last_error = None;
    true
}

/// Launch the ingest pipeline in a background tokio task.
/// Callers must have won [`try_begin`] first.
pub fn launch_fetch(
    config: Arc<Config>,
    db: Arc<dyn Database>,
    fetch_status: Arc<RwLock<FetchStatus>>,
) {
    tokio::spawn(async move {
        run_fetch(config, db, fetch_status).await;
    });
}

async fn run_fetch(
    config: Arc<Config>,
    db: Arc<dyn Database>,
    fetch_status: Arc<RwLock<FetchStatus>>,
) {
    let options = IngestOptions {
        max_entries: config.max_entries_per_feed,
        ..Default::default()
    };

    let result = match FeedClient::new() {
        Ok(client) => ingest::run(db.as_ref(), &client, &options).await,
        Err(e) => Err(e),
    };

    let mut status = fetch_status.write().await;
    status.running = false;
    status.finished_at = Some(Utc::now().to_rfc3339());

    match result {
        Ok(summary) => {
            info!(inserted = summary.inserted, "Background fetch completed");
            status.last_summary = Some(summary);
        }
        Err(e) => {
            error!(error = %e, "Background fetch failed");
            status.last_error = Some(e.to_string());
        }
    }
}

/// Fetch every `interval`, starting one interval after startup.
pub fn spawn_scheduler(state: AppState, interval: Duration) {
    info!(interval_secs = interval.as_secs(), "Scheduled feed fetching enabled");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !try_begin(&state.fetch_status).await {
                info!("Previous fetch still running, skipping scheduled run");
                continue;
            }
            run_fetch(
                state.config.clone(),
                state.db.clone(),
                state.fetch_status.clone(),
            )
            .await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_one_fetch_at_a_time() {
        let status = RwLock::new(FetchStatus::default());
        assert!(try_begin(&status).await);
        assert!(!try_begin(&status).await);

        status.write().await.running = false;
        assert!(try_begin(&status).await);
        assert!(status.read().await.started_at.is_some());
    }
}
