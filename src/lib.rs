// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod metrics;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::IngestConfig;
pub use crate::ingest::{EntryOutcome, Pipeline, RunSummary};
pub use crate::store::{MemoryStore, NotionConfig, NotionStore};
