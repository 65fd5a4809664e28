// Live score handlers.
//
// GET /api/v1/sports/live-scores      : matches in progress, from every provider
// GET /api/v1/sports/live-scores/demo : randomised demo matches
//
// Provider failures never fail the request; they're logged and the
// remaining providers still answer.

use axum::Json;

use crate::sports::{collect_live, DemoProvider, LiveMatch, LiveScoreProvider, ScoreBoard};

pub async fn live_scores() -> Json<Vec<LiveMatch>> {
    let providers: Vec<Box<dyn LiveScoreProvider>> = vec![Box::new(ScoreBoard)];
    Json(collect_live(&providers).await)
}

pub async fn demo_scores() -> Json<Vec<LiveMatch>> {
    let matches = DemoProvider.fetch_matches().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Demo provider failed");
        Vec::new()
    });
    Json(matches)
}
