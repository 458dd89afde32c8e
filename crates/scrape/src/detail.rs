// ABOUTME: Detail-page content and author resolution with per-item failure isolation.
// ABOUTME: Walks the content/author selector chains, falls back to paragraph aggregation, sanitizes the winner.

//! Detail resolution.
//!
//! For each candidate item the detail page is fetched and resolved into a
//! description and an author. Any fetch or parse failure for a single item is
//! captured as `Resolution::Unresolved`; it never aborts sibling items.

use scraper::Html;
use tracing::{debug, warn};

use crate::channel::ORG_NAME;
use crate::models::{CandidateItem, Resolution, ResolvedItem};
use crate::resource;
use crate::sanitize::{is_hidden_style, sanitize_fragment};
use crate::select::{cached_selector, walk_chain, ExtractMode, ExtractRule};

/// Paragraph-aggregation kicks in only when the page has more than this many
/// paragraphs. Empirically tuned for this source family.
pub const PARAGRAPH_FALLBACK_MIN: usize = 4;

/// Content-region chain, most site-specific container first, generic CMS
/// markers last. First selector with non-empty inner HTML wins.
const CONTENT_CHAIN: &[ExtractRule] = &[
    ExtractRule::new("div.article-content", ExtractMode::InnerHtml),
    ExtractRule::new("div.content-main", ExtractMode::InnerHtml),
    ExtractRule::new("div.TRS_Editor", ExtractMode::InnerHtml),
    ExtractRule::new("div.TRS_UEDITOR", ExtractMode::InnerHtml),
    ExtractRule::new("div.Custom_UnionStyle", ExtractMode::InnerHtml),
    ExtractRule::new("div#zoom", ExtractMode::InnerHtml),
];

/// Author-region chain: byline, source, and editor markers.
const AUTHOR_CHAIN: &[ExtractRule] = &[
    ExtractRule::new("span.author", ExtractMode::Text),
    ExtractRule::new("div.article-source", ExtractMode::Text),
    ExtractRule::new("span.source", ExtractMode::Text),
    ExtractRule::new("span.ly", ExtractMode::Text),
    ExtractRule::new("p.editor", ExtractMode::Text),
];

/// Resolves the content body of a detail document.
///
/// Walks the content chain first; when no known container matches, falls back
/// to aggregating the page's paragraphs. Whatever raw fragment wins is run
/// through the sanitizer. `None` means content stayed unresolved, which is a
/// valid outcome.
pub fn resolve_content(doc: &Html) -> Option<String> {
    let raw = walk_chain(doc, CONTENT_CHAIN).or_else(|| aggregate_paragraphs(doc))?;
    let cleaned = sanitize_fragment(&raw);
    if cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Last-resort content heuristic: concatenate every visible paragraph,
/// re-wrapped in its own tag, when the page has more than
/// `PARAGRAPH_FALLBACK_MIN` paragraphs. Inline-hidden paragraphs are skipped.
fn aggregate_paragraphs(doc: &Html) -> Option<String> {
    let selector = cached_selector("p")?;
    let paragraphs: Vec<_> = doc.select(&selector).collect();
    if paragraphs.len() <= PARAGRAPH_FALLBACK_MIN {
        return None;
    }

    let mut out = String::new();
    for p in paragraphs {
        let hidden = p
            .value()
            .attr("style")
            .map(is_hidden_style)
            .unwrap_or(false);
        if hidden {
            continue;
        }
        out.push_str("<p>");
        out.push_str(&p.inner_html());
        out.push_str("</p>");
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Resolves the author of a detail document.
///
/// First author-chain selector yielding non-empty trimmed text wins; chain
/// exhaustion falls back to the publishing organization's name, so the result
/// is never empty.
pub fn resolve_author(doc: &Html) -> String {
    walk_chain(doc, AUTHOR_CHAIN).unwrap_or_else(|| ORG_NAME.to_string())
}

/// Fetches and resolves one candidate's detail page.
///
/// This is the resilience boundary: every failure mode for a single item
/// (no link, transport error, bad status) is folded into the returned
/// `ResolvedItem` rather than propagated.
pub async fn resolve_item(client: &reqwest::Client, item: CandidateItem) -> ResolvedItem {
    if item.link.is_empty() {
        return ResolvedItem {
            resolution: Resolution::Unresolved {
                reason: "no link".to_string(),
            },
            item,
        };
    }

    match resource::fetch_text(client, &item.link).await {
        Ok(html) => {
            let doc = Html::parse_document(&html);
            let description = resolve_content(&doc);
            if description.is_none() {
                debug!(link = %item.link, "no content region matched");
            }
            let author = resolve_author(&doc);
            ResolvedItem {
                item,
                resolution: Resolution::Resolved {
                    description,
                    author,
                },
            }
        }
        Err(err) => {
            warn!(link = %item.link, error = %err, "detail fetch failed, keeping listing fields");
            ResolvedItem {
                item,
                resolution: Resolution::Unresolved {
                    reason: err.to_string(),
                },
            }
        }
    }
}
