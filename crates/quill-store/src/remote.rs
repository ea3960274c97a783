//! Placeholder posts from a JSONPlaceholder-style demo API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::error::RemoteError;

/// Default demo API.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Posts requested per fetch.
pub const DEFAULT_LIMIT: usize = 5;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One post as served by the demo API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// A source of placeholder posts.
pub trait RemoteSource {
    fn fetch_posts(&self) -> Result<Vec<RemotePost>, RemoteError>;
}

/// Connection settings for [`DemoApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub limit: usize,
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking client for the demo API.
pub struct DemoApiClient {
    client: Client,
    config: RemoteConfig,
}

impl DemoApiClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn posts_url(&self) -> String {
        format!(
            "{}/posts?_limit={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.limit
        )
    }
}

impl RemoteSource for DemoApiClient {
    fn fetch_posts(&self) -> Result<Vec<RemotePost>, RemoteError> {
        let url = self.posts_url();
        debug!(%url, "Fetching remote posts");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, format!("quill/{}", env!("CARGO_PKG_VERSION")))
            .send()?;

        if !response.status().is_success() {
            return Err(RemoteError::Status {
                status: response.status().as_u16(),
            });
        }

        let mut posts: Vec<RemotePost> = response.json()?;
        posts.truncate(self.config.limit);
        debug!(count = posts.len(), "Fetched remote posts");
        Ok(posts)
    }
}
