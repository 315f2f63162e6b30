// src/ingest/types.rs
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editorial bucket a source belongs to. Rendered by its label in logs and
/// in the Notion `Category` select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Macro,
    Mining,
    Flow,
    Research,
    #[serde(rename = "TA")]
    Ta,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Macro => "Macro",
            Category::Mining => "Mining",
            Category::Flow => "Flow",
            Category::Research => "Research",
            Category::Ta => "TA",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub name: String, // unique; also the Notion `Source` select label
    pub url: String,
    pub category: Category,
}

impl Source {
    pub fn new(name: &str, url: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category,
        }
    }
}

/// One feed item as the parser saw it. Every field may be missing;
/// timestamps are kept as the raw strings from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub summary: Option<String>, // may contain HTML
    pub link: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub title: String,
    pub summary: String, // plain text, <= 500 chars
    pub link: String,
    pub date: NaiveDate,
    pub source: String,
    pub category: Category,
    pub can_use_charts: bool,
}

impl NormalizedEntry {
    /// `YYYY-MM-DD`, the form the store expects.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Workflow state of a stored record. New records always start `Unread`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Unread,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Unread => "Unread",
        }
    }
}

/// The record handed to a [`RecordStore`]. Built from a normalized entry with
/// the store's field limits applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub source: String,
    pub category: Category,
    pub date: NaiveDate,
    pub url: String,
    pub summary: String,
    pub can_use_charts: bool,
    pub annotation: String, // "Video Idea", left empty for editors
    pub status: Status,
}

impl Record {
    pub fn from_entry(entry: &NormalizedEntry) -> Self {
        use crate::ingest::normalize::{truncate_chars, MAX_FIELD_CHARS};
        Self {
            title: truncate_chars(&entry.title, MAX_FIELD_CHARS),
            source: entry.source.clone(),
            category: entry.category,
            date: entry.date,
            url: entry.link.clone(),
            summary: truncate_chars(&entry.summary, MAX_FIELD_CHARS),
            can_use_charts: entry.can_use_charts,
            annotation: String::new(),
            status: Status::Unread,
        }
    }

    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Feed collaborator: turns a source into raw entries in feed order.
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, source: &Source) -> Result<Vec<RawEntry>>;
    fn name(&self) -> &'static str;
}

/// Remote datastore the pipeline files records into. The pipeline only ever
/// queries by title and creates; it never updates or deletes.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Whether a record with exactly this title already exists.
    async fn title_exists(&self, title: &str) -> Result<bool>;
    /// Create one record. `Ok` only when the store acknowledged it.
    async fn create(&self, record: &Record) -> Result<()>;
    fn name(&self) -> &'static str;
}
