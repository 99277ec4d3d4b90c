//! Binary display handles
//!
//! A [`BinaryHandle`] is the viewer's exclusively-owned reference to fetched
//! PDF bytes, registered in a [`HandleStore`] the way a browser registers an
//! object URL. Handles must be released exactly once; dropping an unreleased
//! handle releases it.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

/// Identifier of a registered binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(Uuid);

impl HandleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:folio/{}", self.0)
    }
}

/// Registry of live binaries
pub trait HandleStore: Send + Sync {
    /// Register bytes and return the id they resolve under
    fn create(&self, data: Vec<u8>) -> HandleId;

    /// Drop the bytes behind `id`; later resolution fails
    fn release(&self, id: HandleId);

    /// Bytes behind a live id
    fn resolve(&self, id: HandleId) -> Option<Arc<Vec<u8>>>;
}

/// Owned reference to a registered binary
pub struct BinaryHandle {
    id: HandleId,
    size: usize,
    store: Arc<dyn HandleStore>,
    released: bool,
}

impl BinaryHandle {
    /// Register `data` in `store`
    pub fn create(store: Arc<dyn HandleStore>, data: Vec<u8>) -> Self {
        let size = data.len();
        let id = store.create(data);
        tracing::debug!("Created handle {} ({} bytes)", id, size);
        Self {
            id,
            size,
            store,
            released: false,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Object-URL style address of the bytes
    pub fn url(&self) -> String {
        self.id.to_string()
    }

    /// Byte length of the registered payload
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bytes(&self) -> Option<Arc<Vec<u8>>> {
        self.store.resolve(self.id)
    }

    /// Release the registered bytes
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.store.release(self.id);
            tracing::debug!("Released handle {}", self.id);
        }
    }
}

impl Drop for BinaryHandle {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl fmt::Debug for BinaryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHandle")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("released", &self.released)
            .finish()
    }
}

/// In-process handle store
#[derive(Default)]
pub struct MemoryHandleStore {
    entries: Mutex<HashMap<HandleId, Arc<Vec<u8>>>>,
    created: AtomicU64,
    released: AtomicU64,
}

impl MemoryHandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles currently registered
    pub fn live_count(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    pub fn released_count(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }
}

impl HandleStore for MemoryHandleStore {
    fn create(&self, data: Vec<u8>) -> HandleId {
        let id = HandleId::new();
        self.entries.lock().insert(id, Arc::new(data));
        self.created.fetch_add(1, Ordering::SeqCst);
        id
    }

    fn release(&self, id: HandleId) {
        if self.entries.lock().remove(&id).is_some() {
            self.released.fetch_add(1, Ordering::SeqCst);
        } else {
            tracing::warn!("Release of unknown handle {}", id);
        }
    }

    fn resolve(&self, id: HandleId) -> Option<Arc<Vec<u8>>> {
        self.entries.lock().get(&id).cloned()
    }
}
