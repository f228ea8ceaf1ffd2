use async_trait::async_trait;
use reqwest::{Client, Proxy};

use crate::{Result, ScraperError};

/// Browser user agent; the watch page omits caption data for unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Transport used by the pipeline to download documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// GET `url` and return the response body
    async fn fetch(&self, url: &str) -> Result<String>;

    /// GET `url` through the proxy at `proxy` and return the response body
    async fn fetch_via_proxy(&self, url: &str, proxy: &str) -> Result<String>;
}

/// reqwest-backed [`DocumentFetcher`]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ScraperError::Transport {
                url: String::new(),
                proxy: None,
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    async fn get_text(client: &Client, url: &str, proxy: Option<&str>) -> Result<String> {
        let transport = |e: reqwest::Error| ScraperError::Transport {
            url: url.to_string(),
            proxy: proxy.map(str::to_string),
            reason: e.to_string(),
        };

        let response = client.get(url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(ScraperError::HttpStatus {
                url: url.to_string(),
                proxy: proxy.map(str::to_string),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching {}", url);
        Self::get_text(&self.client, url, None).await
    }

    async fn fetch_via_proxy(&self, url: &str, proxy: &str) -> Result<String> {
        tracing::debug!("Fetching {} via proxy {}", url, proxy);

        let invalid_proxy = |e: reqwest::Error| ScraperError::InvalidProxy {
            proxy: proxy.to_string(),
            reason: e.to_string(),
        };

        // Client lives only for this request
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .proxy(Proxy::all(proxy).map_err(invalid_proxy)?)
            .build()
            .map_err(invalid_proxy)?;

        Self::get_text(&client, url, Some(proxy)).await
    }
}
