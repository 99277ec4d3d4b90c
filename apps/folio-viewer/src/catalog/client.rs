//! Catalog client

use std::sync::Arc;

use crate::error::{Result, ViewerError};
use crate::source::DocumentSource;

use super::record::DocumentRecord;

/// Loads the document list; one request per call, no automatic retry
#[derive(Clone)]
pub struct CatalogClient {
    source: Arc<dyn DocumentSource>,
}

impl CatalogClient {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }

    /// Fetch the catalog in server response order
    pub async fn load_catalog(&self) -> Result<Vec<DocumentRecord>> {
        let start = std::time::Instant::now();
        match self.source.fetch_catalog().await {
            Ok(records) => {
                tracing::debug!(
                    "Fetched {} catalog records in {:?}",
                    records.len(),
                    start.elapsed()
                );
                Ok(records)
            }
            Err(e) => {
                tracing::warn!("Catalog request failed: {}", e);
                Err(ViewerError::catalog(e))
            }
        }
    }
}
