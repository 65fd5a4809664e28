use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use super::{LiveMatch, LiveScoreProvider, TeamScore};

fn team(name: &str, short: &str, score: impl Into<String>, overs: Option<String>) -> TeamScore {
    TeamScore {
        name: name.to_string(),
        short: short.to_string(),
        score: score.into(),
        overs,
    }
}

/// Randomised in-progress matches, regenerated on every call.
pub struct DemoProvider;

#[async_trait]
impl LiveScoreProvider for DemoProvider {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_matches(&self) -> Result<Vec<LiveMatch>> {
        let mut rng = rand::rng();
        let now = Utc::now().to_rfc3339();

        let cricket = LiveMatch {
            id: "cricket_1".to_string(),
            sport: "Cricket".to_string(),
            league: "IPL 2024".to_string(),
            status: "LIVE".to_string(),
            team1: team(
                "Mumbai Indians",
                "MI",
                format!("{}/{}", rng.random_range(150..=200), rng.random_range(3..=7)),
                Some(format!("{}.{}", rng.random_range(15..=19), rng.random_range(0..=5))),
            ),
            team2: team(
                "Chennai Super Kings",
                "CSK",
                format!("{}/{}", rng.random_range(120..=180), rng.random_range(4..=8)),
                Some(format!("{}.{}", rng.random_range(12..=17), rng.random_range(0..=5))),
            ),
            time: None,
            venue: "Wankhede Stadium, Mumbai".to_string(),
            details_url: "https://www.espncricinfo.com".to_string(),
            is_live: true,
            last_updated: Some(now.clone()),
        };

        let football = LiveMatch {
            id: "football_1".to_string(),
            sport: "Football".to_string(),
            league: "Premier League".to_string(),
            status: "LIVE".to_string(),
            team1: team(
                "Manchester United",
                "MUN",
                rng.random_range(0..=3).to_string(),
                None,
            ),
            team2: team("Liverpool", "LIV", rng.random_range(0..=3).to_string(), None),
            time: Some(format!("{}'", rng.random_range(45..=90))),
            venue: "Old Trafford".to_string(),
            details_url: "https://www.premierleague.com".to_string(),
            is_live: true,
            last_updated: Some(now),
        };

        Ok(vec![cricket, football])
    }
}

/// A fixed board of fixtures across sports, some live and some not.
pub struct ScoreBoard;

#[async_trait]
impl LiveScoreProvider for ScoreBoard {
    fn name(&self) -> &str {
        "scoreboard"
    }

    async fn fetch_matches(&self) -> Result<Vec<LiveMatch>> {
        let fixture = |id: &str,
                       sport: &str,
                       league: &str,
                       status: &str,
                       teams: (TeamScore, TeamScore),
                       time: Option<&str>,
                       venue: &str,
                       details_url: &str,
                       is_live: bool| LiveMatch {
            id: id.to_string(),
            sport: sport.to_string(),
            league: league.to_string(),
            status: status.to_string(),
            team1: teams.0,
            team2: teams.1,
            time: time.map(str::to_string),
            venue: venue.to_string(),
            details_url: details_url.to_string(),
            is_live,
            last_updated: None,
        };

        Ok(vec![
            fixture(
                "1",
                "Cricket",
                "IPL 2024",
                "LIVE",
                (
                    team("Mumbai Indians", "MI", "185/4", Some("18.3".to_string())),
                    team("Chennai Super Kings", "CSK", "142/6", Some("15.0".to_string())),
                ),
                None,
                "Wankhede Stadium, Mumbai",
                "https://www.espncricinfo.com",
                true,
            ),
            fixture(
                "2",
                "Football",
                "Premier League",
                "LIVE",
                (
                    team("Manchester United", "MUN", "2", None),
                    team("Liverpool", "LIV", "1", None),
                ),
                Some("67'"),
                "Old Trafford",
                "https://www.premierleague.com",
                true,
            ),
            fixture(
                "3",
                "Cricket",
                "Test Match",
                "Day 2",
                (
                    team("India", "IND", "345 & 89/2", Some("25.0".to_string())),
                    team("Australia", "AUS", "287", None),
                ),
                None,
                "MCG, Melbourne",
                "https://www.espncricinfo.com",
                false,
            ),
            fixture(
                "4",
                "Football",
                "La Liga",
                "HT",
                (
                    team("Real Madrid", "RMA", "1", None),
                    team("Barcelona", "BAR", "0", None),
                ),
                None,
                "Santiago Bernabéu",
                "https://www.laliga.com",
                false,
            ),
            fixture(
                "5",
                "Tennis",
                "Australian Open",
                "LIVE",
                (
                    team("Novak Djokovic", "DJO", "6-4, 3-2", None),
                    team("Carlos Alcaraz", "ALC", "4-6, 2-3", None),
                ),
                None,
                "Rod Laver Arena",
                "https://ausopen.com",
                true,
            ),
            fixture(
                "6",
                "Basketball",
                "NBA",
                "Q3",
                (
                    team("LA Lakers", "LAL", "78", None),
                    team("Golden State Warriors", "GSW", "82", None),
                ),
                Some("5:23"),
                "Crypto.com Arena",
                "https://www.nba.com",
                true,
            ),
        ])
    }
}
