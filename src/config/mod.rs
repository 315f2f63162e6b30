// src/config/mod.rs
//! Feeds file: which sources to poll, which keywords count as relevant,
//! which sources are chart-capable, and pipeline knobs.

pub mod defaults;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::types::Source;

pub const ENV_CONFIG_PATH: &str = "FEED_INGEST_CONFIG";
pub const DEFAULT_TOML_PATH: &str = "config/feeds.toml";
pub const DEFAULT_JSON_PATH: &str = "config/feeds.json";

fn default_max_entries() -> usize {
    10
}
fn default_recency_days() -> u32 {
    3
}
fn default_write_delay_ms() -> u64 {
    350
}
fn default_true() -> bool {
    true
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Only the first N entries of each feed are looked at.
    #[serde(default = "default_max_entries")]
    pub max_entries_per_source: usize,
    /// Entries dated before `today - recency_days` are dropped.
    #[serde(default = "default_recency_days")]
    pub recency_days: u32,
    /// Pause after every write attempt (Notion allows ~3 req/s).
    #[serde(default = "default_write_delay_ms")]
    pub write_delay_ms: u64,
    /// Treat a title already written earlier in the same run as a duplicate.
    #[serde(default = "default_true")]
    pub dedup_within_run: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_entries_per_source: default_max_entries(),
            recency_days: default_recency_days(),
            write_delay_ms: default_write_delay_ms(),
            dedup_within_run: true,
        }
    }
}

impl PipelineSettings {
    pub fn write_delay(&self) -> Duration {
        Duration::from_millis(self.write_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestConfig {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default = "defaults::sources")]
    pub sources: Vec<Source>,
    #[serde(default = "defaults::keywords")]
    pub keywords: Vec<String>,
    #[serde(default = "defaults::chart_sources")]
    pub chart_sources: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineSettings::default(),
            sources: defaults::sources(),
            keywords: defaults::keywords(),
            chart_sources: defaults::chart_sources(),
        }
    }
}

impl IngestConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feeds config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing feeds config {}", path.display()))
    }

    /// Resolution order:
    /// 1) $FEED_INGEST_CONFIG
    /// 2) config/feeds.toml
    /// 3) config/feeds.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from(DEFAULT_JSON_PATH);
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Self::default().validated()
    }

    /// `Some(path)` loads exactly that file; `None` walks the default chain.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load_default(),
        }
    }

    /// Trim + dedup the term lists, reject unusable source lists.
    pub fn validated(mut self) -> Result<Self> {
        self.keywords = clean_list(self.keywords);
        self.chart_sources = clean_list(self.chart_sources);

        let mut seen = HashSet::new();
        for s in &mut self.sources {
            s.name = s.name.trim().to_string();
            s.url = s.url.trim().to_string();
            if s.name.is_empty() {
                bail!("source with url {:?} has an empty name", s.url);
            }
            if s.url.is_empty() {
                bail!("source {:?} has an empty url", s.name);
            }
            if !seen.insert(s.name.clone()) {
                bail!("duplicate source name {:?}", s.name);
            }
        }
        if self.pipeline.max_entries_per_source == 0 {
            bail!("pipeline.max_entries_per_source must be > 0");
        }
        Ok(self)
    }

    pub fn is_chart_source(&self, name: &str) -> bool {
        self.chart_sources.iter().any(|c| c == name)
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<IngestConfig> {
    let cfg = match hint_ext {
        "toml" => toml::from_str::<IngestConfig>(s)?,
        "json" => serde_json::from_str::<IngestConfig>(s)?,
        _ => match toml::from_str::<IngestConfig>(s) {
            Ok(c) => c,
            Err(_) => serde_json::from_str::<IngestConfig>(s)
                .map_err(|_| anyhow!("unsupported feeds config format"))?,
        },
    };
    cfg.validated()
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}
