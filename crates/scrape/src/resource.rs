// ABOUTME: HTTP resource fetching with charset-aware body decoding.
// ABOUTME: Validates scheme and status, then decodes bytes using Content-Type charset or detection.

use tracing::debug;

use crate::error::ScrapeError;

/// Fetches a page and returns its body as decoded text.
///
/// Fails with `ScrapeError` on invalid URLs, transport errors, and
/// non-success statuses. Callers decide whether a failure is fatal (the
/// listing page) or swallowed per item (detail pages).
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, anyhow::anyhow!("empty URL")));
    }

    let parsed = url::Url::parse(url).map_err(|e| ScrapeError::invalid_url(url, e))?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ScrapeError::invalid_url(
            url,
            anyhow::anyhow!("scheme must be http or https"),
        ));
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::fetch(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::status(url, status.as_u16()));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = response
        .bytes()
        .await
        .map_err(|e| ScrapeError::fetch(url, e))?;

    debug!(url, bytes = body.len(), "fetched page");
    Ok(decode_body(&body, content_type.as_deref()))
}

/// Decodes body bytes using the Content-Type charset when declared, falling
/// back to detection. The portal's older pages still serve GBK.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extracts the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}
