// src/ingest/providers/feed_xml.rs
//! RSS 2.0 / RSS 1.0 (RDF) / Atom documents -> `RawEntry`s via `feed_rs`.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use metrics::histogram;
use once_cell::sync::OnceCell;
use regex::{Captures, Regex};

use crate::ingest::types::RawEntry;

/// Named entities XML itself understands; everything else is HTML-only.
const XML_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Many feeds leak HTML named entities (`&nbsp;`, `&eacute;`, ...) into XML
/// text, which an XML parser rejects or keeps verbatim. Rewrite each one as a
/// numeric character reference; unknown names are left alone.
pub fn scrub_html_entities_for_xml(s: &str) -> String {
    static RE_ENTITY: OnceCell<Regex> = OnceCell::new();
    let re = RE_ENTITY.get_or_init(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]{1,31});").unwrap());
    re.replace_all(s, |caps: &Captures<'_>| {
        let name = &caps[1];
        if XML_ENTITIES.contains(&name) {
            return caps[0].to_string();
        }
        let decoded = html_escape::decode_html_entities(&caps[0]);
        if decoded == caps[0] {
            return caps[0].to_string();
        }
        decoded.chars().map(|c| format!("&#x{:X};", c as u32)).collect()
    })
    .into_owned()
}

/// First alternate link (rel absent or `alternate`), else any non-empty href.
fn entry_link(entry: &Entry) -> Option<String> {
    let alternate = entry.links.iter().find(|l| {
        let rel = l.rel.as_deref().unwrap_or("");
        !l.href.trim().is_empty() && (rel.is_empty() || rel.eq_ignore_ascii_case("alternate"))
    });
    alternate
        .or_else(|| entry.links.iter().find(|l| !l.href.trim().is_empty()))
        .map(|l| l.href.trim().to_string())
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn stamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339())
}

fn raw_entry(entry: Entry) -> RawEntry {
    let summary = entry
        .summary
        .as_ref()
        .and_then(|s| non_empty(&s.content))
        .or_else(|| {
            entry
                .content
                .as_ref()
                .and_then(|c| c.body.as_deref())
                .and_then(non_empty)
        });
    RawEntry {
        title: entry.title.as_ref().and_then(|t| non_empty(&t.content)),
        link: entry_link(&entry),
        summary,
        published: stamp(entry.published),
        updated: stamp(entry.updated),
    }
}

/// Parse a feed document into raw entries, in document order.
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>> {
    let t0 = std::time::Instant::now();
    let xml = scrub_html_entities_for_xml(xml);
    let feed = parser::parse(xml.as_bytes()).map_err(|e| anyhow!("not a feed document: {e}"))?;
    let out: Vec<RawEntry> = feed.entries.into_iter().map(raw_entry).collect();
    histogram!("ingest_parse_ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    Ok(out)
}
