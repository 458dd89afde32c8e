// ABOUTME: Feed assembly: concurrent detail fan-out and merging into the final feed payload.
// ABOUTME: Listing order is preserved by position; per-item resolution outcomes are flattened into optional fields.

use futures::future::join_all;
use tracing::debug;
use url::Url;

use crate::channel::{ChannelKind, ORG_NAME};
use crate::detail;
use crate::models::{CandidateItem, Feed, FeedItem, Resolution, ResolvedItem};
use crate::time_parse::parse_listing_date;

/// Resolves all candidates concurrently and assembles the feed.
///
/// Detail fetches are issued as one unbounded fan-out; `join_all` returns
/// results in the order the futures were created, so feed ordering equals
/// listing order regardless of completion order. No state is shared between
/// the per-item futures.
pub async fn assemble(
    client: &reqwest::Client,
    kind: ChannelKind,
    base: &Url,
    candidates: Vec<CandidateItem>,
) -> Feed {
    let resolved = join_all(
        candidates
            .into_iter()
            .map(|item| detail::resolve_item(client, item)),
    )
    .await;

    let items = resolved.into_iter().map(into_feed_item).collect();

    let link = base
        .join(kind.listing_path())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| base.to_string());

    Feed {
        title: format!("{} - {}", ORG_NAME, kind.title()),
        link,
        description: kind.description().to_string(),
        language: "zh".to_string(),
        allow_empty: true,
        items,
    }
}

/// Flattens one resolution outcome into a feed item.
///
/// Listing-derived fields are always emitted; description/author only when
/// the detail page was actually resolved.
fn into_feed_item(resolved: ResolvedItem) -> FeedItem {
    let ResolvedItem { item, resolution } = resolved;
    let pub_date = parse_listing_date(&item.raw_date);

    let (description, author) = match resolution {
        Resolution::Resolved {
            description,
            author,
        } => (description, Some(author)),
        Resolution::Unresolved { reason } => {
            debug!(link = %item.link, %reason, "emitting listing fields only");
            (None, None)
        }
    };

    FeedItem {
        title: item.title,
        guid: item.link.clone(),
        link: item.link,
        pub_date,
        description,
        author,
    }
}
