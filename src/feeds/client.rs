use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

/// HTTP client for downloading feed documents.
pub struct FeedClient {
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ground/0.1 (news aggregator)")
            .timeout(Duration::from_secs(20))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Download a feed body. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Feed request failed: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Feed {url} returned {status}");
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read feed body: {url}"))
    }
}
