// src/store/memory.rs
use anyhow::Result;
use std::sync::{Arc, Mutex};

use crate::ingest::normalize::{truncate_chars, MAX_FIELD_CHARS};
use crate::ingest::types::{Record, RecordStore};

/// In-process store. Backs `--dry-run` and the pipeline tests; clones share
/// the same record list.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn snapshot(&self) -> Vec<Record> {
        self.records.lock().expect("store mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn title_exists(&self, title: &str) -> Result<bool> {
        let key = truncate_chars(title, MAX_FIELD_CHARS);
        let v = self.records.lock().expect("store mutex poisoned");
        Ok(v.iter().any(|r| r.title == key))
    }

    async fn create(&self, record: &Record) -> Result<()> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
