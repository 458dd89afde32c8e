// ABOUTME: End-to-end feed generation tests against a mock portal server.
// ABOUTME: Covers ordering, per-item failure isolation, limit handling, and fallback resolution.

use std::time::Duration;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;

use cmafeed_scrape::{ChannelKind, Client, ScrapeError, ORG_NAME};

const LEGAL_LISTING: &str = r#"
<html><body>
<ul class="article-list">
    <li><a href="/zwgk/fzjs/a1.html">第一条法治新闻</a><span class="date">2024-05-20</span></li>
    <li><a href="/zwgk/fzjs/a2.html">第二条法治新闻</a><span class="date">2024-05-19</span></li>
    <li><a href="/zwgk/fzjs/a3.html">第三条法治新闻</a><span class="date">2024-05-18</span></li>
</ul>
</body></html>
"#;

const DETAIL_WITH_CONTAINER: &str = r#"
<html><body>
<span class="source">气象报社</span>
<div class="TRS_Editor">
    <p>正文内容。</p>
    <script>track()</script>
    <div class="share">分享到微博</div>
</div>
</body></html>
"#;

const DETAIL_PARAGRAPH_FALLBACK: &str = r#"
<html><body>
<p>段一</p><p>段二</p><p>段三</p>
<p style="display:none">隐藏段</p>
<p>段四</p><p>段五</p><p>段六</p>
</body></html>
"#;

const DETAIL_NO_CONTENT: &str = r#"
<html><body><p>仅此一段</p></body></html>
"#;

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.base_url())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client builds")
}

async fn mock_listing(server: &MockServer, kind: ChannelKind, body: &str) {
    let path = kind.listing_path().to_string();
    let body = body.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(body);
        })
        .await;
}

async fn mock_detail(server: &MockServer, path: &str, body: &str) {
    let path = path.to_string();
    let body = body.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(body);
        })
        .await;
}

#[tokio::test]
async fn legal_feed_end_to_end() {
    let server = MockServer::start_async().await;
    mock_listing(&server, ChannelKind::Legal, LEGAL_LISTING).await;
    mock_detail(&server, "/zwgk/fzjs/a1.html", DETAIL_WITH_CONTAINER).await;
    mock_detail(&server, "/zwgk/fzjs/a2.html", DETAIL_PARAGRAPH_FALLBACK).await;
    mock_detail(&server, "/zwgk/fzjs/a3.html", DETAIL_NO_CONTENT).await;

    let feed = client_for(&server)
        .generate(ChannelKind::Legal, 10)
        .await
        .unwrap();

    assert_eq!(feed.language, "zh");
    assert!(feed.allow_empty);
    assert!(feed.title.contains(ORG_NAME));
    assert_eq!(feed.items.len(), 3);

    // Item 1: container chain, sanitized.
    let first = &feed.items[0];
    assert_eq!(first.title, "第一条法治新闻");
    assert_eq!(first.guid, first.link);
    assert!(first.link.ends_with("/zwgk/fzjs/a1.html"));
    let desc = first.description.as_deref().unwrap();
    assert!(desc.contains("<p>正文内容。</p>"));
    assert!(!desc.contains("script"));
    assert!(!desc.contains("分享"));
    assert_eq!(first.author.as_deref(), Some("气象报社"));
    assert!(first.pub_date.is_some());

    // Item 2: paragraph fallback excludes the hidden paragraph.
    let second = &feed.items[1];
    assert_eq!(
        second.description.as_deref(),
        Some("<p>段一</p><p>段二</p><p>段三</p><p>段四</p><p>段五</p><p>段六</p>")
    );
    assert_eq!(second.author.as_deref(), Some(ORG_NAME));

    // Item 3: too few paragraphs; empty content is valid, author defaults.
    let third = &feed.items[2];
    assert_eq!(third.description, None);
    assert_eq!(third.author.as_deref(), Some(ORG_NAME));
    assert_eq!(third.title, "第三条法治新闻");
}

#[tokio::test]
async fn detail_failure_is_isolated_to_one_item() {
    let server = MockServer::start_async().await;
    mock_listing(&server, ChannelKind::Legal, LEGAL_LISTING).await;
    mock_detail(&server, "/zwgk/fzjs/a1.html", DETAIL_WITH_CONTAINER).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/zwgk/fzjs/a2.html");
            then.status(500);
        })
        .await;
    mock_detail(&server, "/zwgk/fzjs/a3.html", DETAIL_WITH_CONTAINER).await;

    let feed = client_for(&server)
        .generate(ChannelKind::Legal, 10)
        .await
        .unwrap();

    assert_eq!(feed.items.len(), 3);

    // The failed item keeps its listing-derived fields only.
    let failed = &feed.items[1];
    assert_eq!(failed.title, "第二条法治新闻");
    assert!(failed.link.ends_with("/zwgk/fzjs/a2.html"));
    assert!(failed.pub_date.is_some());
    assert_eq!(failed.description, None);
    assert_eq!(failed.author, None);

    // Siblings are unaffected.
    assert!(feed.items[0].description.is_some());
    assert!(feed.items[2].description.is_some());
}

#[tokio::test]
async fn output_order_matches_listing_order_not_completion_order() {
    let server = MockServer::start_async().await;
    mock_listing(&server, ChannelKind::Legal, LEGAL_LISTING).await;

    // The first item responds last; ordering must still follow the listing.
    server
        .mock_async(|when, then| {
            when.method(GET).path("/zwgk/fzjs/a1.html");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .delay(Duration::from_millis(300))
                .body(DETAIL_WITH_CONTAINER);
        })
        .await;
    mock_detail(&server, "/zwgk/fzjs/a2.html", DETAIL_WITH_CONTAINER).await;
    mock_detail(&server, "/zwgk/fzjs/a3.html", DETAIL_WITH_CONTAINER).await;

    let feed = client_for(&server)
        .generate(ChannelKind::Legal, 10)
        .await
        .unwrap();

    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["第一条法治新闻", "第二条法治新闻", "第三条法治新闻"]
    );
}

#[tokio::test]
async fn limit_truncates_and_zero_yields_empty_feed() {
    let server = MockServer::start_async().await;
    mock_listing(&server, ChannelKind::Legal, LEGAL_LISTING).await;
    mock_detail(&server, "/zwgk/fzjs/a1.html", DETAIL_WITH_CONTAINER).await;
    mock_detail(&server, "/zwgk/fzjs/a2.html", DETAIL_WITH_CONTAINER).await;

    let client = client_for(&server);

    let feed = client.generate(ChannelKind::Legal, 2).await.unwrap();
    assert_eq!(feed.items.len(), 2);

    let feed = client.generate(ChannelKind::Legal, 0).await.unwrap();
    assert!(feed.items.is_empty());
    assert!(feed.allow_empty);
    assert!(!feed.title.is_empty());
}

#[tokio::test]
async fn listing_fetch_failure_is_fatal() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ChannelKind::Legal.listing_path());
            then.status(503);
        })
        .await;

    let err = client_for(&server)
        .generate(ChannelKind::Legal, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
}

#[tokio::test]
async fn empty_listing_page_is_a_valid_empty_feed() {
    let server = MockServer::start_async().await;
    mock_listing(
        &server,
        ChannelKind::Legal,
        "<html><body><p>栏目维护中</p></body></html>",
    )
    .await;

    let feed = client_for(&server)
        .generate(ChannelKind::Legal, 10)
        .await
        .unwrap();
    assert!(feed.items.is_empty());
    assert!(feed.allow_empty);
}

#[tokio::test]
async fn science_feed_end_to_end() {
    let server = MockServer::start_async().await;
    let listing = r#"
        <html><body>
        <div class="kp-list">
            <div class="kp-item">
                <a class="kp-title" href="/kppd/kpdt/s1.html">台风是怎样命名的</a>
                <div class="info"><span class="time">2024-05-20</span></div>
            </div>
        </div>
        </body></html>
    "#;
    mock_listing(&server, ChannelKind::Science, listing).await;
    mock_detail(&server, "/kppd/kpdt/s1.html", DETAIL_WITH_CONTAINER).await;

    let feed = client_for(&server)
        .generate(ChannelKind::Science, 10)
        .await
        .unwrap();

    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].title, "台风是怎样命名的");
    assert!(feed.items[0].pub_date.is_some());
    assert!(feed.items[0].description.is_some());
    assert!(feed.link.ends_with(ChannelKind::Science.listing_path()));
}
