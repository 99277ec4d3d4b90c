//! Viewer state machine
//!
//! `Empty → Fetching → Displaying | Errored → Fetching → ...`
//!
//! The machine is transport-free: [`Viewer::select_document`] issues a
//! [`FetchTicket`], the caller performs the request, and hands the result to
//! [`Viewer::complete_fetch`]. Each selection bumps a generation counter; a
//! ticket from an older generation, or one completed after teardown, is
//! discarded without touching state.

use std::sync::Arc;

use crate::catalog::{distinct_categories, filter, CategoryFilter, DocumentRecord};
use crate::config::ViewerOptions;
use crate::error::{Result, ViewerError};
use crate::handle::{BinaryHandle, HandleStore};
use crate::render::{RenderCapability, ViewerEvents};
use crate::source::{BinaryPayload, SourceError};

use super::state::{
    Theme, ViewerPatch, ViewerState, ViewerStatus, DEFAULT_ZOOM, MIN_ZOOM, ZOOM_STEP,
};

/// An issued binary request, redeemed by [`Viewer::complete_fetch`]
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    record: DocumentRecord,
}

impl FetchTicket {
    pub fn record(&self) -> &DocumentRecord {
        &self.record
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a completed fetch did to the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Displaying,
    Errored(ViewerError),
    /// A newer selection superseded the request
    Stale,
    /// The viewer was torn down while the request was in flight
    TornDown,
}

/// One viewer instance
pub struct Viewer {
    state: ViewerState,
    options: ViewerOptions,
    handles: Arc<dyn HandleStore>,
    renderer: Arc<dyn RenderCapability>,
    events: Arc<dyn ViewerEvents>,
    generation: u64,
    requested: Option<DocumentRecord>,
    torn_down: bool,
}

impl Viewer {
    pub fn new(
        handles: Arc<dyn HandleStore>,
        renderer: Arc<dyn RenderCapability>,
        events: Arc<dyn ViewerEvents>,
    ) -> Self {
        Self {
            state: ViewerState::default(),
            options: ViewerOptions::default(),
            handles,
            renderer,
            events,
            generation: 0,
            requested: None,
            torn_down: false,
        }
    }

    pub fn with_options(mut self, options: ViewerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn options(&self) -> ViewerOptions {
        self.options
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn begin_catalog_load(&mut self) {
        if self.torn_down {
            return;
        }
        self.state.apply(ViewerPatch {
            is_fetching_catalog: Some(true),
            ..Default::default()
        });
    }

    /// Store a catalog load result; on failure the previous catalog stays
    pub fn apply_catalog(&mut self, result: Result<Vec<DocumentRecord>>) -> Result<usize> {
        if self.torn_down {
            return Err(ViewerError::TornDown);
        }
        match result {
            Ok(records) => {
                let count = records.len();
                self.state.apply(ViewerPatch {
                    catalog: Some(records),
                    is_fetching_catalog: Some(false),
                    ..Default::default()
                });
                tracing::info!("Catalog loaded with {} documents", count);
                Ok(count)
            }
            Err(err) => {
                tracing::warn!("Catalog load failed: {:?}", err);
                self.state.apply(ViewerPatch {
                    last_error: Some(Some(err.to_string())),
                    is_fetching_catalog: Some(false),
                    ..Default::default()
                });
                Err(err)
            }
        }
    }

    /// Catalog entries passing the current search text and category
    pub fn visible_documents(&self) -> Vec<DocumentRecord> {
        filter(
            self.state.catalog(),
            self.state.search_text(),
            self.state.category_filter(),
        )
    }

    pub fn categories(&self) -> Vec<CategoryFilter> {
        distinct_categories(self.state.catalog())
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        if self.torn_down {
            return;
        }
        self.state.apply(ViewerPatch {
            search_text: Some(text.into()),
            ..Default::default()
        });
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        if self.torn_down {
            return;
        }
        self.state.apply(ViewerPatch {
            category_filter: Some(category),
            ..Default::default()
        });
    }

    pub fn find_document(&self, id: u64) -> Option<&DocumentRecord> {
        self.state.catalog().iter().find(|record| record.id == id)
    }

    // ------------------------------------------------------------------
    // Binary lifecycle
    // ------------------------------------------------------------------

    /// Start displaying `record`
    ///
    /// Any live handle is released before the ticket is issued.
    pub fn select_document(&mut self, record: &DocumentRecord) -> Result<FetchTicket> {
        if self.torn_down {
            return Err(ViewerError::TornDown);
        }
        let record = self
            .find_document(record.id)
            .cloned()
            .ok_or(ViewerError::NotInCatalog(record.id))?;

        self.release_active_handle();
        self.generation += 1;
        self.requested = Some(record.clone());

        self.state.apply(ViewerPatch {
            status: Some(ViewerStatus::Fetching),
            is_fetching_binary: Some(true),
            current_page: Some(1),
            page_count: Some(None),
            last_error: Some(None),
            ..Default::default()
        });

        tracing::info!(
            "Fetching {} ({}) generation {}",
            record.name,
            record.filename,
            self.generation
        );

        Ok(FetchTicket {
            generation: self.generation,
            record,
        })
    }

    /// Apply the result of the request behind `ticket`
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<BinaryPayload, SourceError>,
    ) -> FetchOutcome {
        if self.torn_down {
            tracing::debug!("Discarding response for {}: viewer torn down", ticket.record.name);
            return FetchOutcome::TornDown;
        }
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale response for {} (generation {}, current {})",
                ticket.record.name,
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(err) => return self.fail(ViewerError::binary(err)),
        };
        if !payload.is_pdf() {
            let content_type = payload.content_type.unwrap_or_else(|| "none".to_string());
            return self.fail(ViewerError::InvalidContentType(content_type));
        }

        let record = ticket.record;
        self.release_active_handle();
        let handle = BinaryHandle::create(Arc::clone(&self.handles), payload.data);
        self.renderer.attach(&handle, &record);
        self.state.active_handle = Some(handle);

        self.state.apply(ViewerPatch {
            status: Some(ViewerStatus::Displaying),
            selected: Some(Some(record.clone())),
            is_fetching_binary: Some(false),
            ..Default::default()
        });
        tracing::info!("Displaying {}", record.name);

        self.render_current();
        self.events.on_document_load(&record);
        FetchOutcome::Displaying
    }

    /// Re-run the most recent selection after a failure
    pub fn retry(&mut self) -> Result<FetchTicket> {
        if self.state.status() != ViewerStatus::Errored {
            return Err(ViewerError::RetryUnavailable);
        }
        let record = self
            .requested
            .clone()
            .or_else(|| self.state.selected().cloned())
            .ok_or(ViewerError::RetryUnavailable)?;

        tracing::info!("Retrying {}", record.name);
        self.select_document(&record)
    }

    /// The rendering capability finished parsing and knows the page count
    ///
    /// Clamps the current page into the new range. Does not count as
    /// navigation, so no page change is reported.
    pub fn report_page_count(&mut self, pages: u32) {
        if self.torn_down || self.state.active_handle().is_none() {
            tracing::debug!("Ignoring page count {} with no live document", pages);
            return;
        }
        self.state.apply(ViewerPatch {
            page_count: Some(Some(pages)),
            ..Default::default()
        });
    }

    /// The rendering capability could not load the attached document
    pub fn report_render_error(&mut self, reason: &str) {
        if self.torn_down || self.state.active_handle().is_none() {
            tracing::debug!("Ignoring render error with no live document: {}", reason);
            return;
        }
        self.fail(ViewerError::RenderFailed(reason.to_string()));
    }

    /// Release everything; later fetch results are discarded
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.generation += 1;
        self.release_active_handle();
        self.state.apply(ViewerPatch {
            status: Some(ViewerStatus::Empty),
            is_fetching_binary: Some(false),
            is_fetching_catalog: Some(false),
            ..Default::default()
        });
        tracing::info!("Viewer torn down");
    }

    fn fail(&mut self, err: ViewerError) -> FetchOutcome {
        tracing::warn!("{}", err);
        self.state.apply(ViewerPatch {
            status: Some(ViewerStatus::Errored),
            last_error: Some(Some(err.to_string())),
            is_fetching_binary: Some(false),
            ..Default::default()
        });
        FetchOutcome::Errored(err)
    }

    fn release_active_handle(&mut self) {
        if let Some(handle) = self.state.active_handle.take() {
            self.renderer.detach();
            handle.release();
        }
    }

    // ------------------------------------------------------------------
    // Navigation and zoom
    // ------------------------------------------------------------------

    /// Move to `target`, clamped to `[1, page count or 1]`
    pub fn go_to_page(&mut self, target: i64) -> u32 {
        if self.torn_down {
            return self.state.current_page();
        }
        let page = target.clamp(1, i64::from(self.state.last_page())) as u32;
        self.state.apply(ViewerPatch {
            current_page: Some(page),
            ..Default::default()
        });
        self.render_current();
        self.events.on_page_change(page);
        page
    }

    pub fn go_first(&mut self) -> u32 {
        self.go_to_page(1)
    }

    pub fn go_last(&mut self) -> u32 {
        self.go_to_page(i64::from(self.state.last_page()))
    }

    pub fn go_next(&mut self) -> u32 {
        self.go_to_page(i64::from(self.state.current_page()) + 1)
    }

    pub fn go_previous(&mut self) -> u32 {
        self.go_to_page(i64::from(self.state.current_page()) - 1)
    }

    /// No upper bound
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.state.zoom() + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom((self.state.zoom() - ZOOM_STEP).max(MIN_ZOOM))
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.set_zoom(DEFAULT_ZOOM)
    }

    fn set_zoom(&mut self, zoom: f64) -> f64 {
        if self.torn_down {
            return self.state.zoom();
        }
        self.state.apply(ViewerPatch {
            zoom: Some(zoom),
            ..Default::default()
        });
        self.render_current();
        self.state.zoom()
    }

    fn render_current(&self) {
        if self.state.status() == ViewerStatus::Displaying {
            self.renderer
                .render_page(self.state.current_page(), self.state.zoom());
        }
    }

    // ------------------------------------------------------------------
    // Chrome
    // ------------------------------------------------------------------

    pub fn toggle_theme(&mut self) -> Theme {
        if self.torn_down {
            return self.state.theme();
        }
        let theme = self.state.theme().toggled();
        self.state.apply(ViewerPatch {
            theme: Some(theme),
            ..Default::default()
        });
        theme
    }

    /// Returns whether the sidebar is open afterwards
    pub fn toggle_sidebar(&mut self) -> bool {
        if self.torn_down || !self.options.sidebar_collapsible {
            return self.state.sidebar_open();
        }
        let open = !self.state.sidebar_open();
        self.state.apply(ViewerPatch {
            sidebar_open: Some(open),
            ..Default::default()
        });
        open
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.teardown();
    }
}
