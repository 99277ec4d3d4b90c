//! Document catalog
//!
//! Loads the document list from a JSON file on disk, falling back to a
//! directory scan when no catalog file exists, and reads stored PDFs.

mod record;
mod store;

pub use record::*;
pub use store::*;
