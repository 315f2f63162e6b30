// src/ingest/mod.rs
//! Ingestion pipeline: fetch → normalize → recency → keywords → dedup → write.
//! Sources and entries are handled strictly one at a time.

pub mod keywords;
pub mod normalize;
pub mod providers;
pub mod types;

use chrono::{Days, Local, NaiveDate};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::IngestConfig;
use crate::ingest::keywords::KeywordMatcher;
use crate::ingest::normalize::{normalize, truncate_chars, MAX_FIELD_CHARS};
use crate::ingest::types::{FeedFetcher, NormalizedEntry, RawEntry, Record, RecordStore, Source};

/// Titles in progress lines are cut to this many characters.
const LOG_TITLE_CHARS: usize = 65;

/// One-time metrics registration (so series show up in the exposition).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_entries_fetched_total",
            "Raw entries parsed from feeds."
        );
        describe_counter!(
            "ingest_entries_total",
            "Entries considered (after the per-source cap)."
        );
        describe_counter!(
            "ingest_stale_total",
            "Entries dropped by the recency window."
        );
        describe_counter!(
            "ingest_skipped_total",
            "Entries skipped, labelled by reason (keyword|duplicate)."
        );
        describe_counter!("ingest_written_total", "Records created in the store.");
        describe_counter!(
            "ingest_write_failures_total",
            "Create requests the store did not acknowledge."
        );
        describe_counter!(
            "ingest_source_errors_total",
            "Feed fetch/parse errors."
        );
        describe_counter!(
            "ingest_duplicate_check_errors_total",
            "Duplicate queries that failed (treated as not duplicate)."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when ingest pipeline last ran."
        );
    });
}

/// What happened to one feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Older than the recency window; not counted as skipped.
    Stale,
    NoKeywordMatch,
    Duplicate,
    Written,
    WriteFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub new_articles: usize,
    pub skipped: usize,
    pub stale: usize,
    pub write_failures: usize,
    pub failed_sources: Vec<String>,
}

impl RunSummary {
    fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Stale => {
                self.stale += 1;
                counter!("ingest_stale_total").increment(1);
            }
            EntryOutcome::NoKeywordMatch => {
                self.skipped += 1;
                counter!("ingest_skipped_total", "reason" => "keyword").increment(1);
            }
            EntryOutcome::Duplicate => {
                self.skipped += 1;
                counter!("ingest_skipped_total", "reason" => "duplicate").increment(1);
            }
            EntryOutcome::Written => {
                self.new_articles += 1;
                counter!("ingest_written_total").increment(1);
            }
            EntryOutcome::WriteFailed => {
                self.write_failures += 1;
                counter!("ingest_write_failures_total").increment(1);
            }
        }
    }
}

/// First date still inside the window: `today - days`. Entries dated on it
/// are kept, anything earlier is stale.
pub fn recency_cutoff(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn is_recent(date: NaiveDate, cutoff: NaiveDate) -> bool {
    date >= cutoff
}

pub struct Pipeline {
    config: IngestConfig,
    matcher: KeywordMatcher,
    fetcher: Box<dyn FeedFetcher>,
    store: Box<dyn RecordStore>,
}

impl Pipeline {
    pub fn new(
        config: IngestConfig,
        fetcher: Box<dyn FeedFetcher>,
        store: Box<dyn RecordStore>,
    ) -> Self {
        let matcher = KeywordMatcher::new(&config.keywords);
        Self {
            config,
            matcher,
            fetcher,
            store,
        }
    }

    /// Run once against today's local date.
    pub async fn run(&self) -> RunSummary {
        self.run_on(Local::now().date_naive()).await
    }

    /// Run once, treating `today` as the processing date.
    pub async fn run_on(&self, today: NaiveDate) -> RunSummary {
        ensure_metrics_described();

        let cutoff = recency_cutoff(today, self.config.pipeline.recency_days);
        let mut summary = RunSummary::default();
        let mut seen_titles: HashSet<String> = HashSet::new();

        info!(
            sources = self.config.sources.len(),
            keywords = self.matcher.len(),
            fetcher = self.fetcher.name(),
            store = self.store.name(),
            %today,
            %cutoff,
            "ingest run starting"
        );

        for source in &self.config.sources {
            info!(source = %source.name, category = %source.category, "📡 polling source");
            let raw = match self.fetcher.fetch(source).await {
                Ok(v) => v,
                Err(e) => {
                    warn!(error = ?e, source = %source.name, "⚠️ source failed, skipping");
                    counter!("ingest_source_errors_total").increment(1);
                    summary.failed_sources.push(source.name.clone());
                    continue;
                }
            };

            let cap = self.config.pipeline.max_entries_per_source;
            for entry in raw.iter().take(cap) {
                counter!("ingest_entries_total").increment(1);
                let outcome = self
                    .process_entry(source, entry, today, cutoff, &mut seen_titles)
                    .await;
                summary.record(outcome);
            }
        }

        gauge!("ingest_pipeline_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        info!(
            new_articles = summary.new_articles,
            skipped = summary.skipped,
            stale = summary.stale,
            write_failures = summary.write_failures,
            failed_sources = summary.failed_sources.len(),
            "✅ New articles: {} | ⏭️ Skipped: {}",
            summary.new_articles,
            summary.skipped
        );
        summary
    }

    async fn process_entry(
        &self,
        source: &Source,
        raw: &RawEntry,
        today: NaiveDate,
        cutoff: NaiveDate,
        seen_titles: &mut HashSet<String>,
    ) -> EntryOutcome {
        let chart = self.config.is_chart_source(&source.name);
        let entry = normalize(raw, source, chart, today);

        if !is_recent(entry.date, cutoff) {
            debug!(source = %source.name, date = %entry.date, "stale entry");
            return EntryOutcome::Stale;
        }

        match self.matcher.first_match(&entry.title, &entry.summary) {
            Some(kw) => debug!(keyword = kw, title = %short(&entry.title), "keyword hit"),
            None => return EntryOutcome::NoKeywordMatch,
        }

        let key = truncate_chars(&entry.title, MAX_FIELD_CHARS);
        if self.config.pipeline.dedup_within_run && seen_titles.contains(&key) {
            debug!(title = %short(&entry.title), "already written this run");
            return EntryOutcome::Duplicate;
        }
        if self.is_duplicate(&entry.title).await {
            debug!(title = %short(&entry.title), "already in store");
            return EntryOutcome::Duplicate;
        }

        let outcome = if self.write(&entry).await {
            info!(source = %source.name, "   ✅ {}", short(&entry.title));
            seen_titles.insert(key);
            EntryOutcome::Written
        } else {
            warn!(source = %source.name, "   ❌ {}", short(&entry.title));
            EntryOutcome::WriteFailed
        };

        let delay = self.config.pipeline.write_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    /// Does the store already hold a record with this title? Store errors
    /// count as "no".
    pub async fn is_duplicate(&self, title: &str) -> bool {
        let key = truncate_chars(title, MAX_FIELD_CHARS);
        match self.store.title_exists(&key).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = ?e, title = %short(title), "duplicate check failed, assuming new");
                counter!("ingest_duplicate_check_errors_total").increment(1);
                false
            }
        }
    }

    /// Submit one record. `true` iff the store acknowledged it; never retried.
    pub async fn write(&self, entry: &NormalizedEntry) -> bool {
        let record = Record::from_entry(entry);
        match self.store.create(&record).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = ?e, title = %short(&entry.title), "record write failed");
                false
            }
        }
    }
}

fn short(title: &str) -> String {
    truncate_chars(title, LOG_TITLE_CHARS)
}
