//! Folio Viewer
//!
//! Client-side core of the Folio PDF viewer: a catalog client that loads and
//! filters document metadata, and a viewer state machine that fetches a
//! selected PDF, owns its display handle, and tracks page and zoom.
//!
//! # Modules
//!
//! - `catalog`: Document records, filtering, catalog loading
//! - `viewer`: State aggregate, state machine, async session
//! - `source`: Transport trait and the HTTP implementation
//! - `handle`: Exclusively-owned binary display handles
//! - `render`: Rendering capability and consumer callback traits

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod handle;
pub mod render;
pub mod source;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogClient, CategoryFilter, DocumentRecord};
pub use config::{ViewerConfig, ViewerOptions};
pub use error::{Result, ViewerError};
pub use handle::{BinaryHandle, HandleStore, MemoryHandleStore};
pub use render::{HeadlessRenderer, NoopEvents, RenderCapability, ViewerEvents};
pub use source::{BinaryPayload, DocumentSource, HttpDocumentSource, SourceError};
pub use viewer::{FetchOutcome, Viewer, ViewerSession, ViewerState, ViewerStatus};
