// ABOUTME: Error types for feed scraping operations.
// ABOUTME: Provides ScrapeError enum with InvalidUrl, Fetch, Status, and Listing variants.

use thiserror::Error;

/// Errors that can occur while generating a feed.
///
/// Only listing-level failures are surfaced to callers. Per-item detail
/// failures are captured into `Resolution::Unresolved` and never become a
/// `ScrapeError`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// The HTTP request failed at the transport level.
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// The server responded with a non-success status.
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The listing page could not be turned into candidate items.
    #[error("listing extraction failed: {0}")]
    Listing(String),
}

impl ScrapeError {
    /// Creates an InvalidUrl error.
    pub fn invalid_url(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        ScrapeError::InvalidUrl {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Creates a Fetch error.
    pub fn fetch(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        ScrapeError::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Creates a Status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        ScrapeError::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a Listing error with a custom message.
    pub fn listing(msg: impl Into<String>) -> Self {
        ScrapeError::Listing(msg.into())
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        matches!(self, ScrapeError::Fetch { .. })
    }

    /// Returns true if this is a Status error.
    pub fn is_status(&self) -> bool {
        matches!(self, ScrapeError::Status { .. })
    }
}
