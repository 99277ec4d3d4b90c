//! Catalog record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::format_bytes;

/// Metadata for one stored PDF
///
/// Immutable once fetched; the full set is refreshed by re-querying the
/// catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique, stable identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Server-side path key for the binary endpoint
    pub filename: String,

    /// Size in bytes
    pub size: u64,

    /// Page count as recorded by the server
    pub pages: u32,

    pub upload_date: DateTime<Utc>,

    pub author: String,

    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub downloads: u64,
}

impl DocumentRecord {
    /// Size for display, e.g. "2.4 MB"
    pub fn display_size(&self) -> String {
        format_bytes(self.size)
    }
}
