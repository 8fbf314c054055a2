//! Header date parsing for ordering and output.
//!
//! Headers carry whatever the archiver wrote: usually
//! `2026-01-05 10:00:00+00:00`, sometimes a raw RFC 2822 mail date or a
//! bare day. Unparseable dates are kept verbatim and sort last.

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Parse a header date, normalized to UTC.
///
/// ```rust
/// use homedigest_core::date::parse_date;
///
/// let a = parse_date("2026-01-05 10:00:00+00:00").unwrap();
/// let b = parse_date("Mon, 05 Jan 2026 02:00:00 -0800").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_date("Untitled block").is_none());
/// ```
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let offset_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]");
    let naive_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let day_format = format_description!("[year]-[month]-[day]");

    OffsetDateTime::parse(raw, offset_format)
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339))
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc2822))
        .or_else(|_| PrimitiveDateTime::parse(raw, naive_format).map(PrimitiveDateTime::assume_utc))
        .or_else(|_| Date::parse(raw, day_format).map(|d| d.midnight().assume_utc()))
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC))
}

/// Canonical output form of a header date: `YYYY-MM-DD HH:MM:SS+00:00`.
///
/// Unparseable input is returned unchanged.
pub fn display_date(raw: &str) -> String {
    let output_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]");
    parse_date(raw).and_then(|dt| dt.format(output_format).ok()).unwrap_or_else(|| raw.to_string())
}

/// Sort key: parseable dates first in time order, then the rest by text.
pub type DateKey = (bool, Option<OffsetDateTime>, String);

/// Precompute the ordering key of a header date.
pub fn date_key(raw: &str) -> DateKey {
    match parse_date(raw) {
        Some(dt) => (false, Some(dt), String::new()),
        None => (true, None, raw.to_string()),
    }
}
