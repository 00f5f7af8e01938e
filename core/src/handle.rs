use crate::engine::SearchEngine;
use parking_lot::RwLock;
use std::sync::Arc;

/// Externally-owned handle to the live engine. Readers take a full snapshot
/// and keep it alive across a concurrent swap, so in-flight queries see the
/// old corpus or the new one in full, never a partial rebuild.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<RwLock<Arc<SearchEngine>>>,
}

impl EngineHandle {
    pub fn new(engine: SearchEngine) -> Self {
        Self { inner: Arc::new(RwLock::new(Arc::new(engine))) }
    }

    /// Current engine snapshot.
    pub fn snapshot(&self) -> Arc<SearchEngine> {
        self.inner.read().clone()
    }

    /// Install a freshly built engine, returning the previous snapshot.
    pub fn swap(&self, engine: SearchEngine) -> Arc<SearchEngine> {
        std::mem::replace(&mut *self.inner.write(), Arc::new(engine))
    }
}
