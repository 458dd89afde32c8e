// ABOUTME: Selector-chain machinery: extraction rules tried in priority order.
// ABOUTME: Includes a compiled-selector cache and first-non-empty chain walking over parsed documents.

//! Selector-chain extraction.
//!
//! Extraction strategies are data, not conditionals: a chain is an ordered
//! slice of [`ExtractRule`]s walked until one yields a non-empty result.
//! Chains are ordered from most site-specific to most generic; the walker
//! stops at the first rule whose first matching element produces content.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// How a matched element is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Take the element's inner HTML, trimmed.
    InnerHtml,
    /// Take the element's inner text with whitespace collapsed.
    Text,
}

/// One extraction rule: a CSS locator paired with an extraction mode.
#[derive(Debug, Clone, Copy)]
pub struct ExtractRule {
    pub css: &'static str,
    pub mode: ExtractMode,
}

impl ExtractRule {
    pub const fn new(css: &'static str, mode: ExtractMode) -> Self {
        Self { css, mode }
    }
}

/// Thread-safe cache of compiled CSS selectors.
///
/// Selector parsing is expensive relative to matching; the chains are walked
/// once per detail page, so compile each selector once and reuse it.
static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for invalid selectors; invalid selectors are cached too so
/// they are only reported once.
pub fn cached_selector(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap();
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    let mut cache = SELECTOR_CACHE.write().unwrap();
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Collapses runs of whitespace into single spaces and trims.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Walks a chain of rules against a document; first non-empty result wins.
///
/// Invalid selectors and empty matches are skipped. Returns `None` when the
/// chain is exhausted, which callers treat as the expected fallback path.
pub fn walk_chain(doc: &Html, rules: &[ExtractRule]) -> Option<String> {
    for rule in rules {
        let selector = match cached_selector(rule.css) {
            Some(s) => s,
            None => continue,
        };
        for el in doc.select(&selector) {
            let value = match rule.mode {
                ExtractMode::InnerHtml => el.inner_html().trim().to_string(),
                ExtractMode::Text => normalize_whitespace(&el.text().collect::<String>()),
            };
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}
