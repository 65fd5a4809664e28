// Reader-side access to the Ground API.
//
// The terminal reader commands (`headlines`, `sources`, `scores`, `login`,
// `signup`) talk to a running server over HTTP rather than opening the
// database, the same way the web front end does.

pub mod session;

use anyhow::{Context, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::db::models::{AccessToken, ArticleQuery, ArticleView, SignupRequest, Source, UserRead};
use crate::sports::LiveMatch;

pub use session::{ClientSession, Theme};

/// The state of a data request as the renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> FetchState<T> {
    /// Collapse a finished request into `Ready` or `Failed`.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => FetchState::Ready(value),
            Err(e) => FetchState::Failed(format!("{e:#}")),
        }
    }
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Thin reqwest wrapper over the `/api/v1` endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ground-reader/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode the JSON body, surfacing the API's
    /// `detail` message on failure.
    async fn send<T: DeserializeOwned>(&self, what: &str, request: RequestBuilder) -> Result<T> {
        debug!(what, "API request");

        let response = self
            .authorized(request)
            .send()
            .await
            .with_context(|| format!("Could not reach the API for {what}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            anyhow::bail!("{what} failed ({status}): {detail}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode {what} response"))
    }

    pub async fn articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleView>> {
        let mut params: Vec<(&str, String)> = vec![
            ("skip", query.skip.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(source_id) = query.source_id {
            params.push(("source_id", source_id.to_string()));
        }
        let request = self.client.get(self.url("/articles/")).query(&params);
        self.send("articles", request).await
    }

    pub async fn sources(&self) -> Result<Vec<Source>> {
        let request = self.client.get(self.url("/sources/"));
        self.send("sources", request).await
    }

    pub async fn live_scores(&self, demo: bool) -> Result<Vec<LiveMatch>> {
        let path = if demo {
            "/sports/live-scores/demo"
        } else {
            "/sports/live-scores"
        };
        let request = self.client.get(self.url(path));
        self.send("live scores", request).await
    }

    /// Exchange credentials for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken> {
        let form = [("username", email), ("password", password)];
        let request = self.client.post(self.url("/login/access-token")).form(&form);
        self.send("login", request).await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<UserRead> {
        let body = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self.client.post(self.url("/users/signup")).json(&body);
        self.send("signup", request).await
    }

    pub async fn me(&self) -> Result<UserRead> {
        let request = self.client.get(self.url("/users/me"));
        self.send("current user", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_state_from_result() {
        let ok: FetchState<u8> = FetchState::from_result(Ok(3));
        assert_eq!(ok, FetchState::Ready(3));

        let err: FetchState<u8> =
            FetchState::from_result(Err(anyhow::anyhow!("inner").context("outer")));
        assert_eq!(err, FetchState::Failed("outer: inner".to_string()));
    }

    #[test]
    fn test_url_joins_api_prefix() {
        let client = ApiClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.url("/articles/"), "http://localhost:8000/api/v1/articles/");
    }
}
