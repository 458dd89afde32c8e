// ABOUTME: Data model for listing candidates, resolved items, and the assembled feed.
// ABOUTME: Keeps the resolved/unresolved distinction explicit so tests can tell fallback from failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listing-derived record before detail enrichment.
///
/// Immutable once created; `link` is an absolute URL (or empty when the
/// listing row carried no href) and doubles as the feed GUID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub title: String,
    pub link: String,
    pub raw_date: String,
}

/// Outcome of resolving one candidate's detail page.
///
/// `Resolved` covers the normal path, including selector-chain exhaustion
/// (`description: None` with the default author). `Unresolved` records a fetch
/// or parse failure that was swallowed; the assembler still emits the item's
/// listing-derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        description: Option<String>,
        author: String,
    },
    Unresolved {
        reason: String,
    },
}

/// A candidate paired with its resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub item: CandidateItem,
    pub resolution: Resolution,
}

/// A single item in the assembled feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// The assembled feed: channel metadata plus items in listing order.
///
/// `allow_empty` signals that zero items is a valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub allow_empty: bool,
    pub items: Vec<FeedItem>,
}
