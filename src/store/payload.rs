// src/store/payload.rs
//! Record <-> Notion wire shapes. Nothing outside this file knows Notion's
//! property types (title / select / rich_text / checkbox / ...).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ingest::normalize::{truncate_chars, MAX_FIELD_CHARS};
use crate::ingest::types::Record;

pub const PROP_TITLE: &str = "Title";
pub const PROP_SOURCE: &str = "Source";
pub const PROP_CATEGORY: &str = "Category";
pub const PROP_DATE: &str = "Date";
pub const PROP_URL: &str = "URL";
pub const PROP_SUMMARY: &str = "Summary";
pub const PROP_CAN_USE_CHARTS: &str = "Can Use Charts";
pub const PROP_VIDEO_IDEA: &str = "Video Idea";
pub const PROP_STATUS: &str = "Status";

fn text(content: &str) -> Value {
    json!([{ "text": { "content": content } }])
}

fn select(name: &str) -> Value {
    json!({ "name": name })
}

/// Body for `POST /v1/pages`.
pub fn create_page(database_id: &str, record: &Record) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            PROP_TITLE: { "title": text(&truncate_chars(&record.title, MAX_FIELD_CHARS)) },
            PROP_SOURCE: { "select": select(&record.source) },
            PROP_CATEGORY: { "select": select(record.category.label()) },
            PROP_DATE: { "date": { "start": record.date_string() } },
            PROP_URL: { "url": record.url },
            PROP_SUMMARY: { "rich_text": text(&truncate_chars(&record.summary, MAX_FIELD_CHARS)) },
            PROP_CAN_USE_CHARTS: { "checkbox": record.can_use_charts },
            PROP_VIDEO_IDEA: { "rich_text": text(&record.annotation) },
            PROP_STATUS: { "select": select(record.status.label()) },
        }
    })
}

/// Body for `POST /v1/databases/{id}/query`: exact title match.
pub fn title_query(title: &str) -> Value {
    json!({
        "filter": {
            "property": PROP_TITLE,
            "title": { "equals": truncate_chars(title, MAX_FIELD_CHARS) }
        }
    })
}

/// The part of a query response we read.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}
