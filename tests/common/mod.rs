// tests/common/mod.rs
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use feed_ingest::config::{IngestConfig, PipelineSettings};
use feed_ingest::ingest::types::{
    Category, FeedFetcher, RawEntry, Record, RecordStore, Source,
};
use feed_ingest::MemoryStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

pub fn rfc3339(date: NaiveDate) -> String {
    format!("{}T12:00:00Z", date.format("%Y-%m-%d"))
}

pub fn entry(title: &str, summary: &str, date: NaiveDate) -> RawEntry {
    RawEntry {
        title: Some(title.to_string()),
        summary: Some(summary.to_string()),
        link: Some(format!("https://example.test/{}", title.len())),
        published: Some(rfc3339(date)),
        updated: None,
    }
}

/// Small config: two sources, three keywords, no write delay.
pub fn config() -> IngestConfig {
    IngestConfig {
        pipeline: PipelineSettings {
            write_delay_ms: 0,
            ..PipelineSettings::default()
        },
        sources: vec![
            Source::new(
                "Hashrate Index",
                "https://hashrateindex.test/feed",
                Category::Mining,
            ),
            Source::new("Lyn Alden", "https://lynalden.test/feed", Category::Macro),
        ],
        keywords: vec!["bitcoin".into(), "hashrate".into(), "miner".into()],
        chart_sources: vec!["Hashrate Index".into()],
    }
}

/// Feed collaborator that serves canned entries (or errors) by source name.
/// Unknown sources yield an empty feed.
#[derive(Clone, Default)]
pub struct FixedFetcher {
    feeds: HashMap<String, std::result::Result<Vec<RawEntry>, String>>,
    pub calls: Arc<AtomicUsize>,
}

impl FixedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: &str, entries: Vec<RawEntry>) -> Self {
        self.feeds.insert(source.to_string(), Ok(entries));
        self
    }

    pub fn failing(mut self, source: &str, msg: &str) -> Self {
        self.feeds.insert(source.to_string(), Err(msg.to_string()));
        self
    }
}

#[async_trait]
impl FeedFetcher for FixedFetcher {
    async fn fetch(&self, source: &Source) -> Result<Vec<RawEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.feeds.get(&source.name) {
            Some(Ok(v)) => Ok(v.clone()),
            Some(Err(msg)) => Err(anyhow!(msg.clone())),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// MemoryStore wrapper that counts calls and can be told to misbehave.
#[derive(Clone, Default)]
pub struct SpyStore {
    pub inner: MemoryStore,
    pub queries: Arc<AtomicUsize>,
    pub creates: Arc<AtomicUsize>,
    pub fail_queries: bool,
    pub fail_creates: bool,
    /// Answer every query with "not found", like a store that has not caught up.
    pub blind: bool,
}

impl SpyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for SpyStore {
    async fn title_exists(&self, title: &str) -> Result<bool> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries {
            return Err(anyhow!("HTTP 502"));
        }
        if self.blind {
            return Ok(false);
        }
        self.inner.title_exists(title).await
    }

    async fn create(&self, record: &Record) -> Result<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates {
            return Err(anyhow!("HTTP 400"));
        }
        self.inner.create(record).await
    }

    fn name(&self) -> &'static str {
        "spy"
    }
}
