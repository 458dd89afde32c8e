// ABOUTME: Channel definitions for the portal's listing columns.
// ABOUTME: ChannelKind selects the listing layout strategy and carries per-channel feed metadata.

use std::fmt;

/// The organization name used as the feed byline and default item author.
pub const ORG_NAME: &str = "中国气象局";

/// Which listing column to scrape, selected once at entry by the caller's
/// `type` parameter.
///
/// The two columns use different listing markup: `Legal` rows keep title and
/// date in adjacent sibling elements, `Science` cards nest both under a shared
/// container. The layout strategies live in `listing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelKind {
    #[default]
    Legal,
    Science,
}

impl ChannelKind {
    /// Parses the caller-facing `type` parameter. Anything other than
    /// "science" falls back to the legal column, matching the route default.
    pub fn from_type_param(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "science" => ChannelKind::Science,
            _ => ChannelKind::Legal,
        }
    }

    /// Listing page path relative to the portal base URL.
    pub fn listing_path(&self) -> &'static str {
        match self {
            ChannelKind::Legal => "/zwgk/fzjs/index.html",
            ChannelKind::Science => "/kppd/kpdt/index.html",
        }
    }

    /// Human-readable column title.
    pub fn title(&self) -> &'static str {
        match self {
            ChannelKind::Legal => "法治建设",
            ChannelKind::Science => "气象科普",
        }
    }

    /// Channel description used at the feed level.
    pub fn description(&self) -> &'static str {
        match self {
            ChannelKind::Legal => "中国气象局法治建设动态",
            ChannelKind::Science => "中国气象局气象科普动态",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChannelKind::Legal => "legal",
            ChannelKind::Science => "science",
        };
        write!(f, "{}", s)
    }
}
