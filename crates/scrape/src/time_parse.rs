// ABOUTME: Tolerant date parsing for listing date strings.
// ABOUTME: Tries the portal's date formats in order; malformed input yields None, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses a raw listing date string into a UTC timestamp.
///
/// The portal writes dates as `2024-05-20`, `2024/05/20`, `2024.05.20`, or
/// `2024年5月20日`, sometimes with a time of day and sometimes wrapped in
/// brackets or parentheses. Returns `None` for anything unrecognized; a
/// malformed date is an accepted outcome, not an error.
pub fn parse_listing_date(s: &str) -> Option<DateTime<Utc>> {
    let cleaned = s
        .trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '(' | ')' | '（' | '）'))
        .trim();
    if cleaned.is_empty() {
        return None;
    }

    // Datetime formats first; a date-only pattern would not consume the time.
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y年%m月%d日 %H:%M:%S",
        "%Y年%m月%d日 %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}
