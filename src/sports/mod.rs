// Live sports scores.
//
// Scores come from pluggable providers behind the LiveScoreProvider trait.
// Two providers ship in-tree: DemoProvider (randomised in-progress cricket and
// football matches, for exercising the UI) and ScoreBoard (a fixed board of
// live and finished fixtures). Real data APIs slot in as further providers.

pub mod providers;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use providers::{DemoProvider, ScoreBoard};

/// One side of a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub short: String,
    pub score: String,
    /// Cricket only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overs: Option<String>,
}

/// A fixture as shown on the live-scores page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    pub id: String,
    pub sport: String,
    pub league: String,
    /// "LIVE", "HT", "Day 2", "FT", ...
    pub status: String,
    pub team1: TeamScore,
    pub team2: TeamScore,
    /// Match clock for football ("67'")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub venue: String,
    pub details_url: String,
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// A source of fixtures.
#[async_trait]
pub trait LiveScoreProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Current fixtures, live or not.
    async fn fetch_matches(&self) -> Result<Vec<LiveMatch>>;
}

/// Gather fixtures from every provider and keep the ones in progress.
///
/// A failing provider is logged and skipped; the others still contribute.
pub async fn collect_live(providers: &[Box<dyn LiveScoreProvider>]) -> Vec<LiveMatch> {
    let mut live = Vec::new();
    for provider in providers {
        match provider.fetch_matches().await {
            Ok(matches) => live.extend(matches.into_iter().filter(|m| m.is_live)),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Live score provider failed");
            }
        }
    }
    live
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl LiveScoreProvider for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_matches(&self) -> Result<Vec<LiveMatch>> {
            anyhow::bail!("upstream returned 503")
        }
    }

    #[tokio::test]
    async fn test_collect_live_filters_finished_matches() {
        let providers: Vec<Box<dyn LiveScoreProvider>> = vec![Box::new(ScoreBoard)];
        let board = ScoreBoard.fetch_matches().await.unwrap();
        let live = collect_live(&providers).await;
        assert!(live.iter().all(|m| m.is_live));
        assert!(live.len() < board.len());
    }

    #[tokio::test]
    async fn test_collect_live_skips_failing_provider() {
        let providers: Vec<Box<dyn LiveScoreProvider>> =
            vec![Box::new(Failing), Box::new(DemoProvider)];
        let live = collect_live(&providers).await;
        assert_eq!(live.len(), 2);
    }

    #[test]
    fn test_match_json_is_camel_case() {
        let m = LiveMatch {
            id: "x".to_string(),
            sport: "Football".to_string(),
            league: "La Liga".to_string(),
            status: "HT".to_string(),
            team1: TeamScore {
                name: "Real Madrid".to_string(),
                short: "RMA".to_string(),
                score: "1".to_string(),
                overs: None,
            },
            team2: TeamScore {
                name: "Barcelona".to_string(),
                short: "BAR".to_string(),
                score: "0".to_string(),
                overs: None,
            },
            time: None,
            venue: "Santiago Bernabeu".to_string(),
            details_url: "https://www.laliga.com".to_string(),
            is_live: false,
            last_updated: None,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["detailsUrl"], "https://www.laliga.com");
        assert_eq!(json["isLive"], false);
        assert!(json.get("time").is_none());
        assert!(json["team1"].get("overs").is_none());
    }
}
