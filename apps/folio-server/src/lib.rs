//! Folio Server Library
//!
//! A mock document server: serves a JSON document catalog and the raw PDF
//! bytes behind it from local disk.
//!
//! # Modules
//!
//! - `catalog`: Catalog file loading, directory scan fallback, file reads
//! - `routes`: HTTP routes (`/documents`, `/pdfs`, `/health`)

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
