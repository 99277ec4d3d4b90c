//! Rendering capability and consumer callbacks
//!
//! PDF parsing and painting live outside this crate. The viewer hands a live
//! [`BinaryHandle`] to a [`RenderCapability`] and asks it to paint pages; the
//! capability reports page counts and load failures back through
//! `Viewer::report_page_count` and `Viewer::report_render_error`.

use parking_lot::Mutex;

use crate::catalog::DocumentRecord;
use crate::handle::BinaryHandle;

/// External PDF rendering engine
pub trait RenderCapability: Send + Sync {
    /// Start displaying the bytes behind `handle`
    fn attach(&self, handle: &BinaryHandle, record: &DocumentRecord);

    /// Paint a 1-based page at a zoom factor
    fn render_page(&self, page: u32, zoom: f64);

    /// Stop using the attached handle; called before it is released
    fn detach(&self);
}

/// Consumer-facing notifications
pub trait ViewerEvents: Send + Sync {
    /// Once per transition into `Displaying`
    fn on_document_load(&self, _record: &DocumentRecord) {}

    /// Once per navigation action, with the resulting page
    fn on_page_change(&self, _page: u32) {}
}

/// Events sink that ignores everything
pub struct NoopEvents;

impl ViewerEvents for NoopEvents {}

/// Renderer that paints nothing and logs what it was asked to do
///
/// It trusts the catalog's declared page count, which the caller can feed
/// back through `Viewer::report_page_count`.
#[derive(Default)]
pub struct HeadlessRenderer {
    attached: Mutex<Option<AttachedDocument>>,
}

#[derive(Debug, Clone)]
struct AttachedDocument {
    url: String,
    name: String,
    pages: u32,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page count declared by the attached record
    pub fn declared_page_count(&self) -> Option<u32> {
        self.attached.lock().as_ref().map(|doc| doc.pages)
    }

    pub fn is_attached(&self) -> bool {
        self.attached.lock().is_some()
    }
}

impl RenderCapability for HeadlessRenderer {
    fn attach(&self, handle: &BinaryHandle, record: &DocumentRecord) {
        tracing::info!(
            "Attached {} ({}, {} bytes)",
            record.name,
            handle.url(),
            handle.size()
        );
        *self.attached.lock() = Some(AttachedDocument {
            url: handle.url(),
            name: record.name.clone(),
            pages: record.pages,
        });
    }

    fn render_page(&self, page: u32, zoom: f64) {
        match self.attached.lock().as_ref() {
            Some(doc) => tracing::info!(
                "Render {} page {}/{} at {:.0}% from {}",
                doc.name,
                page,
                doc.pages,
                zoom * 100.0,
                doc.url
            ),
            None => tracing::warn!("Render requested with nothing attached"),
        }
    }

    fn detach(&self) {
        if let Some(doc) = self.attached.lock().take() {
            tracing::debug!("Detached {}", doc.name);
        }
    }
}
