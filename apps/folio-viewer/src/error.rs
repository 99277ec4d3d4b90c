//! Viewer error types
//!
//! Every variant is non-fatal: the viewer records the message in
//! `last_error` and stays interactive.

use thiserror::Error;

use crate::source::SourceError;

/// Generic message surfaced when the catalog cannot be loaded
pub const CATALOG_FAILED_MESSAGE: &str = "Failed to load documents";

/// Viewer error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// Catalog request failed; the detail is logged, not surfaced
    #[error("Failed to load documents")]
    CatalogFetchFailed(String),

    /// Binary request failed at the transport or HTTP layer
    #[error("Failed to load PDF: {0}")]
    BinaryFetchFailed(String),

    /// Binary response carried something other than a PDF
    #[error("Response is not a valid PDF (content type: {0})")]
    InvalidContentType(String),

    /// The rendering capability could not load the document
    #[error("Failed to render PDF: {0}")]
    RenderFailed(String),

    /// Selected record is not part of the loaded catalog
    #[error("Document {0} is not in the catalog")]
    NotInCatalog(u64),

    /// Retry requested outside the errored state
    #[error("Nothing to retry")]
    RetryUnavailable,

    /// Viewer was torn down
    #[error("Viewer has been torn down")]
    TornDown,
}

impl ViewerError {
    /// Wrap a source failure from the catalog endpoint
    pub fn catalog(err: SourceError) -> Self {
        ViewerError::CatalogFetchFailed(err.to_string())
    }

    /// Wrap a source failure from the binary endpoint
    pub fn binary(err: SourceError) -> Self {
        ViewerError::BinaryFetchFailed(err.to_string())
    }
}

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;
