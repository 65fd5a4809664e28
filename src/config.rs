use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default API base URL for the reader commands.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Key for signing access tokens (GROUND_SECRET_KEY)
    pub secret_key: String,
    /// Access token lifetime in minutes (default 30)
    pub token_ttl_minutes: u64,
    /// Base URL the reader commands talk to
    pub api_url: String,
    /// Seconds between scheduled feed fetches while serving (default 1800)
    pub fetch_interval_secs: u64,
    /// Max entries taken from each feed per fetch (default 50)
    pub max_entries_per_feed: usize,
    /// Where the reader keeps its theme and token
    pub session_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the secret key, which is only
    /// required by commands that issue or check tokens.
    pub fn load() -> Result<Self> {
        Ok(Self {
            db_path: env::var("GROUND_DB_PATH").unwrap_or_else(|_| "./ground.db".to_string()),
            secret_key: env::var("GROUND_SECRET_KEY").unwrap_or_default(),
            token_ttl_minutes: parse_var("GROUND_TOKEN_TTL_MINUTES", 30)?,
            api_url: env::var("GROUND_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            fetch_interval_secs: parse_var("GROUND_FETCH_INTERVAL_SECS", 1800)?,
            max_entries_per_feed: parse_var("GROUND_MAX_ENTRIES", 50)?,
            session_path: env::var("GROUND_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| crate::client::session::default_session_path()),
        })
    }

    /// Check that the token signing key is configured.
    /// Call this before serving the API.
    pub fn require_secret(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            anyhow::bail!(
                "GROUND_SECRET_KEY not set. Add it to your .env file.\n\
                 Any long random string works, e.g. the output of `openssl rand -hex 32`."
            );
        }
        Ok(())
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_minutes.saturating_mul(60)
    }
}

/// Parse a numeric env var, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{name} must be a number ({e}): {raw}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: u64 = parse_var("GROUND_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_require_secret() {
        let mut config = Config {
            db_path: ":memory:".to_string(),
            secret_key: String::new(),
            token_ttl_minutes: 30,
            api_url: DEFAULT_API_URL.to_string(),
            fetch_interval_secs: 1800,
            max_entries_per_feed: 50,
            session_path: PathBuf::from("/tmp/ground-session.json"),
        };
        assert!(config.require_secret().is_err());
        config.secret_key = "s3cret".to_string();
        assert!(config.require_secret().is_ok());
        assert_eq!(config.token_ttl_secs(), 1800);
    }

    #[test]
    fn test_huge_token_ttl_saturates() {
        let config = Config {
            db_path: ":memory:".to_string(),
            secret_key: "s3cret".to_string(),
            token_ttl_minutes: u64::MAX / 2,
            api_url: DEFAULT_API_URL.to_string(),
            fetch_interval_secs: 1800,
            max_entries_per_feed: 50,
            session_path: PathBuf::from("/tmp/ground-session.json"),
        };
        assert_eq!(config.token_ttl_secs(), u64::MAX);
    }
}
