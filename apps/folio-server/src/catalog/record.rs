//! Catalog record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one stored PDF, as served by `GET /documents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique, stable identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Stored filename, the key for `GET /pdfs/{filename}`
    pub filename: String,

    /// Size in bytes
    pub size: u64,

    /// Page count
    pub pages: u32,

    /// When the document was uploaded
    pub upload_date: DateTime<Utc>,

    pub author: String,

    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub downloads: u64,
}

/// Category assigned to records synthesized from a directory scan
pub const UNCATEGORIZED: &str = "uncategorized";

/// Raw file read from the PDF directory
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
