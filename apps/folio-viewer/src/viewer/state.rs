//! Viewer state aggregate
//!
//! All viewer fields live in one [`ViewerState`] and change through
//! [`ViewerState::apply`], so related fields (`selected` and `current_page`,
//! `page_count` and `current_page`) are never observed half-updated.

use crate::catalog::{CategoryFilter, DocumentRecord};
use crate::handle::BinaryHandle;

/// Zoom factor a new viewer starts at
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Lower bound for the zoom factor
pub const MIN_ZOOM: f64 = 0.3;
/// Zoom change per zoom in/out action
pub const ZOOM_STEP: f64 = 0.2;

/// Lifecycle of the displayed document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewerStatus {
    /// Nothing selected yet
    #[default]
    Empty,
    /// Binary request in flight
    Fetching,
    /// Handle live and attached to the renderer
    Displaying,
    /// Fetch or render failure; retry available
    Errored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Single mutable aggregate per viewer instance
#[derive(Debug)]
pub struct ViewerState {
    status: ViewerStatus,
    catalog: Vec<DocumentRecord>,
    selected: Option<DocumentRecord>,
    page_count: Option<u32>,
    current_page: u32,
    zoom: f64,
    is_fetching_binary: bool,
    is_fetching_catalog: bool,
    last_error: Option<String>,
    search_text: String,
    category_filter: CategoryFilter,
    theme: Theme,
    sidebar_open: bool,
    pub(super) active_handle: Option<BinaryHandle>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            status: ViewerStatus::Empty,
            catalog: Vec::new(),
            selected: None,
            page_count: None,
            current_page: 1,
            zoom: DEFAULT_ZOOM,
            is_fetching_binary: false,
            is_fetching_catalog: true,
            last_error: None,
            search_text: String::new(),
            category_filter: CategoryFilter::All,
            theme: Theme::Light,
            sidebar_open: true,
            active_handle: None,
        }
    }
}

/// Partial update: `Some` fields replace, `None` fields are left alone
///
/// Optional state fields take `Some(None)` to clear them.
#[derive(Debug, Default)]
pub struct ViewerPatch {
    pub status: Option<ViewerStatus>,
    pub catalog: Option<Vec<DocumentRecord>>,
    pub selected: Option<Option<DocumentRecord>>,
    pub page_count: Option<Option<u32>>,
    pub current_page: Option<u32>,
    pub zoom: Option<f64>,
    pub is_fetching_binary: Option<bool>,
    pub is_fetching_catalog: Option<bool>,
    pub last_error: Option<Option<String>>,
    pub search_text: Option<String>,
    pub category_filter: Option<CategoryFilter>,
    pub theme: Option<Theme>,
    pub sidebar_open: Option<bool>,
}

impl ViewerState {
    /// Apply a patch, then restore the page and zoom invariants
    pub fn apply(&mut self, patch: ViewerPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(catalog) = patch.catalog {
            self.catalog = catalog;
        }
        if let Some(selected) = patch.selected {
            self.selected = selected;
        }
        if let Some(page_count) = patch.page_count {
            self.page_count = page_count;
        }
        if let Some(current_page) = patch.current_page {
            self.current_page = current_page;
        }
        if let Some(zoom) = patch.zoom {
            self.zoom = zoom;
        }
        if let Some(flag) = patch.is_fetching_binary {
            self.is_fetching_binary = flag;
        }
        if let Some(flag) = patch.is_fetching_catalog {
            self.is_fetching_catalog = flag;
        }
        if let Some(last_error) = patch.last_error {
            self.last_error = last_error;
        }
        if let Some(search_text) = patch.search_text {
            self.search_text = search_text;
        }
        if let Some(category_filter) = patch.category_filter {
            self.category_filter = category_filter;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(open) = patch.sidebar_open {
            self.sidebar_open = open;
        }

        self.current_page = self.current_page.clamp(1, self.last_page());
        if self.zoom.is_nan() || self.zoom < MIN_ZOOM {
            self.zoom = MIN_ZOOM;
        }
    }

    pub fn status(&self) -> ViewerStatus {
        self.status
    }

    pub fn catalog(&self) -> &[DocumentRecord] {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&DocumentRecord> {
        self.selected.as_ref()
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    /// Highest reachable page: the page count, or 1 while it is unknown
    pub fn last_page(&self) -> u32 {
        self.page_count.unwrap_or(1).max(1)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_fetching_binary(&self) -> bool {
        self.is_fetching_binary
    }

    pub fn is_fetching_catalog(&self) -> bool {
        self.is_fetching_catalog
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn active_handle(&self) -> Option<&BinaryHandle> {
        self.active_handle.as_ref()
    }
}
