//! Notion database as a [`RecordStore`].
//!
//! Two endpoints are used:
//! * `POST /v1/databases/{id}/query` with an exact-title filter (duplicate check)
//! * `POST /v1/pages` (create)
//!
//! Both count as successful only on HTTP 200.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::ingest::types::{Record, RecordStore};
use crate::store::payload::{self, QueryResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const NOTION_VERSION: &str = "2022-06-28";

#[derive(Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub database_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

// Keep the key out of Debug output.
impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &"***")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl NotionConfig {
    /// Both values are required for any store interaction.
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        let database_id = database_id.into().trim().to_string();
        if api_key.is_empty() {
            bail!("Missing NOTION_API_KEY");
        }
        if database_id.is_empty() {
            bail!("Missing NOTION_DATABASE_ID");
        }
        Ok(Self {
            api_key,
            database_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

pub struct NotionStore {
    http: Client,
    cfg: NotionConfig,
}

impl NotionStore {
    pub fn new(cfg: NotionConfig) -> Self {
        let http = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, cfg }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{}", self.cfg.base_url, path))
            .bearer_auth(&self.cfg.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }
}

#[async_trait]
impl RecordStore for NotionStore {
    async fn title_exists(&self, title: &str) -> Result<bool> {
        let path = format!("/v1/databases/{}/query", self.cfg.database_id);
        let rsp = self
            .post(&path)
            .json(&payload::title_query(title))
            .send()
            .await
            .context("notion query request failed")?;

        let status = rsp.status();
        if status != StatusCode::OK {
            let body = rsp.text().await.unwrap_or_default();
            return Err(anyhow!("notion query HTTP {status}: {}", snippet(&body)));
        }
        let parsed: QueryResponse = rsp.json().await.context("notion query body")?;
        Ok(!parsed.results.is_empty())
    }

    async fn create(&self, record: &Record) -> Result<()> {
        let rsp = self
            .post("/v1/pages")
            .json(&payload::create_page(&self.cfg.database_id, record))
            .send()
            .await
            .context("notion create request failed")?;

        let status = rsp.status();
        if status != StatusCode::OK {
            let body = rsp.text().await.unwrap_or_default();
            return Err(anyhow!("notion create HTTP {status}: {}", snippet(&body)));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "notion"
    }
}

fn snippet(body: &str) -> String {
    crate::ingest::normalize::truncate_chars(body, 200)
}
