// ABOUTME: The Client struct tying the pipeline together: listing fetch, extraction, detail fan-out, assembly.
// ABOUTME: ClientBuilder provides a fluent API for timeout, user agent, base URL, and a custom HTTP client.

use std::time::Duration;

use scraper::Html;
use tracing::info;
use url::Url;

use crate::channel::ChannelKind;
use crate::error::ScrapeError;
use crate::listing::extract_listing;
use crate::models::Feed;
use crate::{feed, resource};

/// Default portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.cma.gov.cn";

/// Configuration options for the feed client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub base_url: String,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "cmafeed/0.1".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: None,
        }
    }
}

/// Builder for constructing [`Client`] instances.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Override the portal base URL (used by tests against a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Use a custom HTTP client instead of building one from the options.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the client. Fails only on an unparseable base URL or an HTTP
    /// client construction error.
    pub fn build(self) -> Result<Client, ScrapeError> {
        Client::new(self.opts)
    }
}

/// The feed client: one instance per portal base, reused across requests.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&opts.base_url)
            .map_err(|e| ScrapeError::invalid_url(&opts.base_url, e))?;

        let http = match opts.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(opts.timeout)
                .user_agent(opts.user_agent.clone())
                .build()
                .map_err(|e| ScrapeError::fetch(&opts.base_url, e))?,
        };

        Ok(Self { http, base_url })
    }

    /// Generates one feed for a channel.
    ///
    /// The listing fetch is the only fatal step: without a listing document
    /// there is nothing to emit. Everything downstream degrades per item. An
    /// empty listing is valid and produces an empty feed (`allow_empty`).
    pub async fn generate(&self, kind: ChannelKind, limit: usize) -> Result<Feed, ScrapeError> {
        let listing_url = self
            .base_url
            .join(kind.listing_path())
            .map_err(|e| ScrapeError::invalid_url(kind.listing_path(), e))?;

        info!(channel = %kind, url = %listing_url, limit, "generating feed");
        let html = resource::fetch_text(&self.http, listing_url.as_str()).await?;

        // Scoped so the non-Send document is dropped before the fan-out await.
        let candidates = {
            let doc = Html::parse_document(&html);
            extract_listing(&doc, kind, limit, &self.base_url)
        };
        info!(channel = %kind, count = candidates.len(), "extracted listing candidates");

        Ok(feed::assemble(&self.http, kind, &self.base_url, candidates).await)
    }
}
