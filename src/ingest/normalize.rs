// src/ingest/normalize.rs
//! Raw feed item -> `NormalizedEntry`. Nothing in here fails: missing or
//! unparseable fields fall back to defaults.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::ingest::types::{NormalizedEntry, RawEntry, Source};

pub const NO_TITLE: &str = "No Title";
pub const MAX_SUMMARY_CHARS: usize = 500;
/// Notion rejects title/rich_text content longer than this.
pub const MAX_FIELD_CHARS: usize = 2000;

/// Keep the first `max` characters (not bytes) of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Strip markup from a feed summary and cap it at 500 characters.
pub fn clean_html(raw: &str) -> String {
    // 1) Strip tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"<[^<]+?>").unwrap());
    let mut out = re_tags.replace_all(raw, "").to_string();

    // 2) HTML entity decode
    out = html_escape::decode_html_entities(&out).to_string();

    // 3) Collapse whitespace (incl. decoded &nbsp;)
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    truncate_chars(out.trim(), MAX_SUMMARY_CHARS)
}

/// Offset-carrying layouts seen in the wild besides strict RFC 3339
/// (`+0000` offsets, a space instead of `T`).
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Offset-less timestamps are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a feed timestamp into its UTC calendar date.
/// Accepts RFC 2822 (RSS), RFC 3339 (Atom, dc:date), ISO-like variants with
/// `+hhmm` offsets or no offset at all, and a bare `YYYY-MM-DD`.
pub fn parse_feed_date(ts: &str) -> Option<NaiveDate> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(ts) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(ts, f).ok())
    {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(ts, f).ok())
    {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}

/// Titles are plain text; feeds that double-escape (`&amp;eacute;`) still
/// carry HTML entities after XML decoding.
pub fn clean_title(raw: &str) -> String {
    html_escape::decode_html_entities(raw.trim()).into_owned()
}

/// `published` wins over `updated`; a field that fails to parse counts as absent.
pub fn entry_date(raw: &RawEntry) -> Option<NaiveDate> {
    [raw.published.as_deref(), raw.updated.as_deref()]
        .into_iter()
        .flatten()
        .find_map(parse_feed_date)
}

pub fn normalize(
    raw: &RawEntry,
    source: &Source,
    can_use_charts: bool,
    today: NaiveDate,
) -> NormalizedEntry {
    NormalizedEntry {
        title: raw
            .title
            .as_deref()
            .map(clean_title)
            .unwrap_or_else(|| NO_TITLE.to_string()),
        summary: clean_html(raw.summary.as_deref().unwrap_or_default()),
        link: raw.link.clone().unwrap_or_default(),
        date: entry_date(raw).unwrap_or(today),
        source: source.name.clone(),
        category: source.category,
        can_use_charts,
    }
}
