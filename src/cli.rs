//! Command-line interface. Every option can also come from the environment
//! (or a `.env` file, loaded before parsing).

use clap::Parser;
use std::path::PathBuf;

/// Poll the configured feeds once and file relevant entries into Notion.
///
/// ```sh
/// NOTION_API_KEY=secret_... NOTION_DATABASE_ID=... feed-ingest
/// feed-ingest --config config/feeds.toml --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Feeds file (TOML or JSON). Defaults to config/feeds.toml, then the built-in list.
    #[arg(short, long, env = "FEED_INGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_api_key: Option<String>,

    /// Target Notion database id
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,

    /// Notion API base URL
    #[arg(long, env = "NOTION_BASE_URL", default_value = crate::store::notion::DEFAULT_BASE_URL)]
    pub notion_base_url: String,

    /// Run against an in-memory store; nothing is written to Notion
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "FEED_INGEST_JSON_LOGS")]
    pub json_logs: bool,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub print_metrics: bool,
}
