//! Async driver for the viewer state machine
//!
//! The viewer lock is held only around state transitions, never across a
//! network await, so a second selection can start while the first request is
//! still outstanding.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::catalog::{CatalogClient, DocumentRecord};
use crate::error::{Result, ViewerError};
use crate::source::DocumentSource;

use super::machine::{FetchOutcome, FetchTicket, Viewer};

/// A viewer bound to a document source
pub struct ViewerSession {
    viewer: Arc<Mutex<Viewer>>,
    catalog: CatalogClient,
    source: Arc<dyn DocumentSource>,
}

impl ViewerSession {
    pub fn new(viewer: Viewer, source: Arc<dyn DocumentSource>) -> Self {
        Self {
            viewer: Arc::new(Mutex::new(viewer)),
            catalog: CatalogClient::new(Arc::clone(&source)),
            source,
        }
    }

    /// Lock the viewer for synchronous operations (navigation, zoom, filters)
    pub async fn lock(&self) -> MutexGuard<'_, Viewer> {
        self.viewer.lock().await
    }

    /// Load the catalog into the viewer; returns the record count
    pub async fn load_catalog(&self) -> Result<usize> {
        self.viewer.lock().await.begin_catalog_load();
        let result = self.catalog.load_catalog().await;
        self.viewer.lock().await.apply_catalog(result)
    }

    /// Select a record and fetch its binary
    pub async fn select(&self, record: &DocumentRecord) -> Result<FetchOutcome> {
        let ticket = self.viewer.lock().await.select_document(record)?;
        Ok(self.fetch(ticket).await)
    }

    /// Select a catalog record by id
    pub async fn select_by_id(&self, id: u64) -> Result<FetchOutcome> {
        let ticket = {
            let mut viewer = self.viewer.lock().await;
            let record = viewer
                .find_document(id)
                .cloned()
                .ok_or(ViewerError::NotInCatalog(id))?;
            viewer.select_document(&record)?
        };
        Ok(self.fetch(ticket).await)
    }

    /// Retry the last failed selection
    pub async fn retry(&self) -> Result<FetchOutcome> {
        let ticket = self.viewer.lock().await.retry()?;
        Ok(self.fetch(ticket).await)
    }

    pub async fn teardown(&self) {
        self.viewer.lock().await.teardown();
    }

    async fn fetch(&self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.source.fetch_binary(ticket.record()).await;
        self.viewer.lock().await.complete_fetch(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BinaryPayload, SourceError};
    use crate::testing::{FakeSource, RecordingEvents, RecordingRenderer, TrackingStore};
    use crate::viewer::ViewerStatus;

    struct Fixture {
        session: ViewerSession,
        source: Arc<FakeSource>,
        store: Arc<TrackingStore>,
        events: Arc<RecordingEvents>,
    }

    fn fixture() -> Fixture {
        let source = Arc::new(FakeSource::new());
        let store = Arc::new(TrackingStore::default());
        let events = Arc::new(RecordingEvents::default());
        let viewer = Viewer::new(
            store.clone(),
            Arc::new(RecordingRenderer::default()),
            events.clone(),
        );
        let session = ViewerSession::new(viewer, source.clone());
        Fixture {
            session,
            source,
            store,
            events,
        }
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let f = fixture();
        assert!(f.session.lock().await.state().is_fetching_catalog());

        assert_eq!(f.session.load_catalog().await.unwrap(), 5);
        let viewer = f.session.lock().await;
        assert!(!viewer.state().is_fetching_catalog());
        assert_eq!(viewer.state().catalog().len(), 5);
    }

    #[tokio::test]
    async fn test_load_catalog_failure_then_manual_retry() {
        let f = fixture();
        f.source.set_catalog(Err(SourceError::Status(502)));
        assert!(f.session.load_catalog().await.is_err());
        {
            let viewer = f.session.lock().await;
            assert_eq!(viewer.state().last_error(), Some("Failed to load documents"));
            assert!(viewer.state().catalog().is_empty());
        }

        f.source.set_catalog(Ok(crate::catalog::test_records()));
        assert_eq!(f.session.load_catalog().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_select_by_id_displays() {
        let f = fixture();
        f.session.load_catalog().await.unwrap();

        let outcome = f.session.select_by_id(3).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Displaying);
        assert_eq!(f.events.loads(), vec![3]);

        let viewer = f.session.lock().await;
        let bytes = viewer.state().active_handle().unwrap().bytes().unwrap();
        assert_eq!(bytes.as_slice(), b"%PDF-1.7 3");
    }

    #[tokio::test]
    async fn test_select_unknown_id() {
        let f = fixture();
        f.session.load_catalog().await.unwrap();
        assert_eq!(
            f.session.select_by_id(42).await.unwrap_err(),
            ViewerError::NotInCatalog(42)
        );
    }

    #[tokio::test]
    async fn test_slow_first_fetch_does_not_clobber_second() {
        let f = fixture();
        f.session.load_catalog().await.unwrap();
        let (a, b) = {
            let viewer = f.session.lock().await;
            (
                viewer.find_document(1).cloned().unwrap(),
                viewer.find_document(2).cloned().unwrap(),
            )
        };
        let release_a = f.source.gate(&a.filename);

        let first = f.session.select(&a);
        let second = async {
            tokio::task::yield_now().await;
            let outcome = f.session.select(&b).await;
            release_a.send(()).unwrap();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(second.unwrap(), FetchOutcome::Displaying);
        assert_eq!(first.unwrap(), FetchOutcome::Stale);

        let viewer = f.session.lock().await;
        assert_eq!(viewer.state().selected().map(|r| r.id), Some(2));
        assert_eq!(viewer.state().status(), ViewerStatus::Displaying);
        assert_eq!(f.store.created(), 1);
        assert_eq!(f.store.live(), 1);
        assert_eq!(f.events.loads(), vec![2]);
    }

    #[tokio::test]
    async fn test_teardown_during_fetch() {
        let f = fixture();
        f.session.load_catalog().await.unwrap();
        let record = f.session.lock().await.find_document(1).cloned().unwrap();
        let release = f.source.gate(&record.filename);

        let select = f.session.select(&record);
        let teardown = async {
            tokio::task::yield_now().await;
            f.session.teardown().await;
            release.send(()).unwrap();
        };
        let (outcome, ()) = tokio::join!(select, teardown);

        assert_eq!(outcome.unwrap(), FetchOutcome::TornDown);
        assert_eq!(f.store.created(), 0);
        assert!(f.events.loads().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_invalid_content_type() {
        let f = fixture();
        f.session.load_catalog().await.unwrap();
        f.source.set_binary(
            "doc-2.pdf",
            Ok(BinaryPayload::new(Some("text/html"), b"<html>".to_vec())),
        );

        let outcome = f.session.select_by_id(2).await.unwrap();
        assert!(matches!(
            outcome,
            FetchOutcome::Errored(ViewerError::InvalidContentType(_))
        ));
        assert_eq!(f.store.created(), 0);

        f.source
            .set_binary("doc-2.pdf", Ok(BinaryPayload::pdf(b"%PDF".to_vec())));
        assert_eq!(f.session.retry().await.unwrap(), FetchOutcome::Displaying);
        assert_eq!(f.store.created(), 1);
    }
}
