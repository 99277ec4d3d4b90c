//! Test doubles shared by the unit tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::catalog::{test_records, DocumentRecord};
use crate::handle::{BinaryHandle, HandleId, HandleStore, MemoryHandleStore};
use crate::render::{RenderCapability, ViewerEvents};
use crate::source::{BinaryPayload, DocumentSource, SourceError};
use crate::viewer::Viewer;

/// Handle store that panics if a handle is created while another is live
#[derive(Default)]
pub struct TrackingStore {
    inner: MemoryHandleStore,
    log: Mutex<Vec<HandleEvent>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEvent {
    Created(HandleId),
    Released(HandleId),
}

impl TrackingStore {
    pub fn created(&self) -> u64 {
        self.inner.created_count()
    }

    pub fn released(&self) -> u64 {
        self.inner.released_count()
    }

    pub fn live(&self) -> usize {
        self.inner.live_count()
    }

    pub fn log(&self) -> Vec<HandleEvent> {
        self.log.lock().clone()
    }
}

impl HandleStore for TrackingStore {
    fn create(&self, data: Vec<u8>) -> HandleId {
        assert_eq!(
            self.released(),
            self.created(),
            "handle created while another handle is still live"
        );
        let id = self.inner.create(data);
        self.log.lock().push(HandleEvent::Created(id));
        id
    }

    fn release(&self, id: HandleId) {
        self.inner.release(id);
        self.log.lock().push(HandleEvent::Released(id));
    }

    fn resolve(&self, id: HandleId) -> Option<Arc<Vec<u8>>> {
        self.inner.resolve(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Attach { url: String, document: u64 },
    Render { page: u32, zoom: f64 },
    Detach,
}

#[derive(Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<RenderCall>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    pub fn last_render(&self) -> Option<(u32, f64)> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            RenderCall::Render { page, zoom } => Some((*page, *zoom)),
            _ => None,
        })
    }
}

impl RenderCapability for RecordingRenderer {
    fn attach(&self, handle: &BinaryHandle, record: &DocumentRecord) {
        self.calls.lock().push(RenderCall::Attach {
            url: handle.url(),
            document: record.id,
        });
    }

    fn render_page(&self, page: u32, zoom: f64) {
        self.calls.lock().push(RenderCall::Render { page, zoom });
    }

    fn detach(&self) {
        self.calls.lock().push(RenderCall::Detach);
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    loads: Mutex<Vec<u64>>,
    pages: Mutex<Vec<u32>>,
}

impl RecordingEvents {
    pub fn loads(&self) -> Vec<u64> {
        self.loads.lock().clone()
    }

    pub fn pages(&self) -> Vec<u32> {
        self.pages.lock().clone()
    }
}

impl ViewerEvents for RecordingEvents {
    fn on_document_load(&self, record: &DocumentRecord) {
        self.loads.lock().push(record.id);
    }

    fn on_page_change(&self, page: u32) {
        self.pages.lock().push(page);
    }
}

/// Viewer wired to recording doubles
pub struct Harness {
    pub viewer: Viewer,
    pub store: Arc<TrackingStore>,
    pub renderer: Arc<RecordingRenderer>,
    pub events: Arc<RecordingEvents>,
}

impl Harness {
    /// Viewer with [`test_records`] already loaded
    pub fn loaded() -> Self {
        let mut harness = Self::empty();
        harness.viewer.apply_catalog(Ok(test_records())).unwrap();
        harness
    }

    pub fn empty() -> Self {
        let store = Arc::new(TrackingStore::default());
        let renderer = Arc::new(RecordingRenderer::default());
        let events = Arc::new(RecordingEvents::default());
        let viewer = Viewer::new(store.clone(), renderer.clone(), events.clone());
        Self {
            viewer,
            store,
            renderer,
            events,
        }
    }

    pub fn record(&self, id: u64) -> DocumentRecord {
        self.viewer.find_document(id).cloned().unwrap()
    }

    /// Select and successfully complete a fetch for `id`
    pub fn display(&mut self, id: u64) {
        let record = self.record(id);
        let ticket = self.viewer.select_document(&record).unwrap();
        self.viewer
            .complete_fetch(ticket, Ok(BinaryPayload::pdf(b"%PDF-1.7".to_vec())));
    }
}

/// In-memory source whose binary responses can be held back
pub struct FakeSource {
    catalog: Mutex<Result<Vec<DocumentRecord>, SourceError>>,
    binaries: Mutex<HashMap<String, Result<BinaryPayload, SourceError>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl FakeSource {
    /// Serves [`test_records`], each as a small PDF
    pub fn new() -> Self {
        let records = test_records();
        let binaries: HashMap<_, _> = records
            .iter()
            .map(|r| {
                let body = format!("%PDF-1.7 {}", r.id).into_bytes();
                (r.filename.clone(), Ok(BinaryPayload::pdf(body)))
            })
            .collect();
        Self {
            catalog: Mutex::new(Ok(records)),
            binaries: Mutex::new(binaries),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_catalog(&self, result: Result<Vec<DocumentRecord>, SourceError>) {
        *self.catalog.lock() = result;
    }

    pub fn set_binary(&self, filename: &str, result: Result<BinaryPayload, SourceError>) {
        self.binaries.lock().insert(filename.to_string(), result);
    }

    /// Hold the next fetch of `filename` until the returned sender fires
    pub fn gate(&self, filename: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(filename.to_string(), rx);
        tx
    }
}

#[async_trait]
impl DocumentSource for FakeSource {
    async fn fetch_catalog(&self) -> Result<Vec<DocumentRecord>, SourceError> {
        self.catalog.lock().clone()
    }

    async fn fetch_binary(&self, record: &DocumentRecord) -> Result<BinaryPayload, SourceError> {
        let gate = self.gates.lock().remove(&record.filename);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.binaries
            .lock()
            .get(&record.filename)
            .cloned()
            .unwrap_or(Err(SourceError::Status(404)))
    }
}
