// ABOUTME: Listing extractor producing candidate items from the portal's column pages.
// ABOUTME: Implements both layout strategies: legal (title/date siblings) and science (shared card container).

//! Listing extraction.
//!
//! Both layouts implement the same contract: given a parsed listing document
//! and a limit, produce up to `limit` candidates in document order. A broken
//! row degrades (empty date, empty link) instead of aborting extraction.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::channel::ChannelKind;
use crate::links;
use crate::models::CandidateItem;
use crate::select::{cached_selector, normalize_whitespace};

// Legal column: <li><a>title</a><span class="date">2024-05-20</span></li>
const LEGAL_TITLE_LINKS: &str = "ul.article-list li a";
const LEGAL_DATE_MARKER: &str = "span.date";

// Science column: cards nest the anchor and the date under one container,
// with the date inside an info block rather than next to the anchor.
const SCIENCE_TITLE_LINKS: &str = "div.kp-list div.kp-item a.kp-title";
const SCIENCE_DATE_MARKER: &str = "span.time";

/// Extracts up to `limit` candidate items from a listing document.
///
/// Titles are trimmed anchor text; links are normalized against `base` (a
/// missing href yields an empty link, and the item is still included); dates
/// stay raw strings for downstream parsing. Fewer rows than `limit` is fine.
pub fn extract_listing(
    doc: &Html,
    kind: ChannelKind,
    limit: usize,
    base: &Url,
) -> Vec<CandidateItem> {
    if limit == 0 {
        return Vec::new();
    }
    match kind {
        ChannelKind::Legal => extract_sibling_layout(doc, limit, base),
        ChannelKind::Science => extract_container_layout(doc, limit, base),
    }
}

/// Legal layout: the date lives in the element immediately following the
/// title anchor. A title with no matching date sibling keeps an empty date.
fn extract_sibling_layout(doc: &Html, limit: usize, base: &Url) -> Vec<CandidateItem> {
    let anchor_sel = match cached_selector(LEGAL_TITLE_LINKS) {
        Some(s) => s,
        None => return Vec::new(),
    };
    let date_sel = cached_selector(LEGAL_DATE_MARKER);

    doc.select(&anchor_sel)
        .take(limit)
        .map(|anchor| CandidateItem {
            title: normalize_whitespace(&anchor.text().collect::<String>()),
            link: href_of(anchor, base),
            raw_date: date_sel
                .as_ref()
                .map(|sel| immediate_date_sibling(anchor, sel))
                .unwrap_or_default(),
        })
        .collect()
}

/// Science layout: the date is found by searching the anchor's parent
/// container, not by sibling adjacency.
fn extract_container_layout(doc: &Html, limit: usize, base: &Url) -> Vec<CandidateItem> {
    let anchor_sel = match cached_selector(SCIENCE_TITLE_LINKS) {
        Some(s) => s,
        None => return Vec::new(),
    };
    let date_sel = cached_selector(SCIENCE_DATE_MARKER);

    doc.select(&anchor_sel)
        .take(limit)
        .map(|anchor| CandidateItem {
            title: normalize_whitespace(&anchor.text().collect::<String>()),
            link: href_of(anchor, base),
            raw_date: date_sel
                .as_ref()
                .map(|sel| date_in_parent(anchor, sel))
                .unwrap_or_default(),
        })
        .collect()
}

fn href_of(anchor: ElementRef, base: &Url) -> String {
    anchor
        .value()
        .attr("href")
        .map(|href| links::normalize(href, base))
        .unwrap_or_default()
}

/// Returns the text of the anchor's immediate next element sibling when it
/// matches the date marker, otherwise an empty string.
fn immediate_date_sibling(anchor: ElementRef, date_sel: &Selector) -> String {
    for sibling in anchor.next_siblings() {
        let Some(el) = ElementRef::wrap(sibling) else {
            // Skip whitespace text nodes between the anchor and the date.
            continue;
        };
        if date_sel.matches(&el) {
            return normalize_whitespace(&el.text().collect::<String>());
        }
        // The immediate element sibling is something else; the row is broken.
        return String::new();
    }
    String::new()
}

/// Returns the text of the first date node inside the anchor's parent.
fn date_in_parent(anchor: ElementRef, date_sel: &Selector) -> String {
    anchor
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.select(date_sel).next())
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("https://www.cma.gov.cn/zwgk/fzjs/index.html").unwrap()
    }

    const LEGAL_LISTING: &str = r#"
        <html><body>
        <ul class="article-list">
            <li><a href="./202405/t20240520_1.html">气象法治宣传活动</a><span class="date">2024-05-20</span></li>
            <li><a href="/zwgk/fzjs/202405/t20240518_2.html">普法工作部署</a> <span class="date">2024-05-18</span></li>
            <li><a href="https://example.gov.cn/t3.html">外部转载</a><span class="date">2024-05-15</span></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn legal_layout_pairs_titles_with_date_siblings() {
        let doc = Html::parse_document(LEGAL_LISTING);
        let items = extract_listing(&doc, ChannelKind::Legal, 10, &base());
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "气象法治宣传活动");
        assert_eq!(
            items[0].link,
            "https://www.cma.gov.cn/zwgk/fzjs/202405/t20240520_1.html"
        );
        assert_eq!(items[0].raw_date, "2024-05-20");
        assert_eq!(
            items[1].link,
            "https://www.cma.gov.cn/zwgk/fzjs/202405/t20240518_2.html"
        );
        assert_eq!(items[1].raw_date, "2024-05-18");
        assert_eq!(items[2].link, "https://example.gov.cn/t3.html");
    }

    #[test]
    fn legal_layout_respects_limit() {
        let doc = Html::parse_document(LEGAL_LISTING);
        let items = extract_listing(&doc, ChannelKind::Legal, 2, &base());
        assert_eq!(items.len(), 2);

        let items = extract_listing(&doc, ChannelKind::Legal, 0, &base());
        assert!(items.is_empty());
    }

    #[test]
    fn broken_adjacency_degrades_to_empty_date() {
        let html = r#"
            <ul class="article-list">
                <li><a href="/a.html">有日期</a><span class="date">2024-01-01</span></li>
                <li><a href="/b.html">无日期</a></li>
                <li><a href="/c.html">错位</a><em>new</em><span class="date">2024-01-03</span></li>
            </ul>
        "#;
        let doc = Html::parse_document(html);
        let items = extract_listing(&doc, ChannelKind::Legal, 10, &base());
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].raw_date, "2024-01-01");
        assert_eq!(items[1].raw_date, "");
        assert_eq!(items[2].raw_date, "");
    }

    #[test]
    fn missing_href_is_included_with_empty_link() {
        let html = r#"
            <ul class="article-list">
                <li><a>占位标题</a><span class="date">2024-01-01</span></li>
            </ul>
        "#;
        let doc = Html::parse_document(html);
        let items = extract_listing(&doc, ChannelKind::Legal, 10, &base());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "");
        assert_eq!(items[0].title, "占位标题");
    }

    const SCIENCE_LISTING: &str = r#"
        <html><body>
        <div class="kp-list">
            <div class="kp-item">
                <a class="kp-title" href="/kppd/kpdt/202405/t1.html">台风是怎样命名的</a>
                <div class="info"><span class="time">2024-05-20</span></div>
            </div>
            <div class="kp-item">
                <a class="kp-title" href="/kppd/kpdt/202405/t2.html">雷电防护常识</a>
                <div class="info"><span class="time">2024-05-19</span></div>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn science_layout_finds_date_inside_parent_container() {
        let doc = Html::parse_document(SCIENCE_LISTING);
        let items = extract_listing(&doc, ChannelKind::Science, 10, &base());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "台风是怎样命名的");
        assert_eq!(
            items[0].link,
            "https://www.cma.gov.cn/kppd/kpdt/202405/t1.html"
        );
        assert_eq!(items[0].raw_date, "2024-05-20");
        assert_eq!(items[1].raw_date, "2024-05-19");
    }

    #[test]
    fn science_card_without_date_degrades_to_empty() {
        let html = r#"
            <div class="kp-list">
                <div class="kp-item"><a class="kp-title" href="/t.html">无日期卡片</a></div>
            </div>
        "#;
        let doc = Html::parse_document(html);
        let items = extract_listing(&doc, ChannelKind::Science, 10, &base());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].raw_date, "");
    }

    #[test]
    fn empty_listing_yields_no_items() {
        let doc = Html::parse_document("<html><body><p>维护中</p></body></html>");
        assert!(extract_listing(&doc, ChannelKind::Legal, 10, &base()).is_empty());
        assert!(extract_listing(&doc, ChannelKind::Science, 10, &base()).is_empty());
    }
}
