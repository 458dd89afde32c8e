// ABOUTME: Core library for cmafeed, a resilient article-feed extractor for the CMA portal.
// ABOUTME: Re-exports the public API: Client, ChannelKind, models, link normalization, and sanitization.

//! cmafeed-scrape - listing-to-feed extraction for the CMA news portal.
//!
//! The pipeline flows strictly forward: listing page → candidate items →
//! concurrent detail fetches → sanitized content → assembled feed. One
//! failing item never aborts the batch; the only fatal error is a listing
//! page that cannot be fetched.
//!
//! # Example
//!
//! ```no_run
//! use cmafeed_scrape::{ChannelKind, Client, ScrapeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().build()?;
//!     let feed = client.generate(ChannelKind::Legal, 10).await?;
//!     println!("{} items", feed.items.len());
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod client;
pub mod detail;
pub mod error;
pub mod feed;
pub mod links;
pub mod listing;
pub mod models;
pub mod resource;
pub mod sanitize;
pub mod select;
pub mod time_parse;

pub use crate::channel::{ChannelKind, ORG_NAME};
pub use crate::client::{Client, ClientBuilder, Options, DEFAULT_BASE_URL};
pub use crate::error::ScrapeError;
pub use crate::links::normalize;
pub use crate::models::{CandidateItem, Feed, FeedItem, Resolution, ResolvedItem};
pub use crate::sanitize::sanitize_fragment;
pub use crate::select::{ExtractMode, ExtractRule};
pub use crate::time_parse::parse_listing_date;
