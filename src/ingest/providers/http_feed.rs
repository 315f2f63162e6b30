use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use reqwest::Client;
use std::time::Duration;

use crate::ingest::providers::feed_xml::parse_feed;
use crate::ingest::types::{FeedFetcher, RawEntry, Source};

const USER_AGENT: &str = concat!("feed-ingest/", env!("CARGO_PKG_VERSION"));

/// Downloads a source's feed over HTTP and parses it with [`parse_feed`].
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFeedFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

impl Default for HttpFeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, source: &Source) -> Result<Vec<RawEntry>> {
        let resp = match self
            .client
            .get(&source.url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!(error = ?e, source = %source.name, "feed http error");
                return Err(e).with_context(|| format!("GET {}", source.url));
            }
        };
        let body = resp
            .error_for_status()
            .with_context(|| format!("GET {}", source.url))?
            .text()
            .await
            .context("feed http .text()")?;

        let entries =
            parse_feed(&body).with_context(|| format!("parsing feed of {}", source.name))?;
        counter!("ingest_entries_fetched_total").increment(entries.len() as u64);
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
