// src/store/mod.rs
//! Remote record stores. The pipeline only sees `RecordStore`; Notion's
//! payload shapes stay in `payload`.

pub mod memory;
pub mod notion;
pub mod payload;

pub use memory::MemoryStore;
pub use notion::{NotionConfig, NotionStore};
