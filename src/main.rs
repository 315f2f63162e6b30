//! feed-ingest: one-shot entrypoint.
//! Loads configuration, polls every feed once, files relevant entries into
//! Notion, and exits. Scheduling is left to cron.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feed_ingest::cli::Cli;
use feed_ingest::ingest::providers::HttpFeedFetcher;
use feed_ingest::ingest::types::RecordStore;
use feed_ingest::metrics::Metrics;
use feed_ingest::{IngestConfig, MemoryStore, NotionConfig, NotionStore, Pipeline};

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feed_ingest=info,warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    init_tracing(args.json_logs);

    let metrics = if args.print_metrics {
        Some(Metrics::install()?)
    } else {
        None
    };

    let config = IngestConfig::load(args.config.as_deref()).context("loading feeds config")?;

    let store: Box<dyn RecordStore> = if args.dry_run {
        info!("dry run: records stay in memory");
        Box::new(MemoryStore::new())
    } else {
        let cfg = NotionConfig::new(
            args.notion_api_key.unwrap_or_default(),
            args.notion_database_id.unwrap_or_default(),
        )?
        .with_base_url(args.notion_base_url);
        Box::new(NotionStore::new(cfg))
    };

    let pipeline = Pipeline::new(config, Box::new(HttpFeedFetcher::new()), store);
    let summary = pipeline.run().await;

    if !summary.failed_sources.is_empty() {
        info!(sources = ?summary.failed_sources, "sources that failed this run");
    }

    if let Some(m) = metrics {
        println!("{}", m.render());
    }

    Ok(())
}
