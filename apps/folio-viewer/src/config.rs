//! Configuration management for the Folio viewer

use std::env;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Base URL of the catalog and binary endpoints
    pub base_url: String,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `FOLIO_BASE_URL`, falling back to the default
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("FOLIO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// Behavior switches for a viewer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOptions {
    /// When false, toggling the sidebar is a no-op
    pub sidebar_collapsible: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            sidebar_collapsible: true,
        }
    }
}
