use std::sync::{Arc, Mutex, MutexGuard};

use crate::resume::store::DocumentStore;
use crate::resume::validation::ValidationPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one live document. Handlers hold the lock for a whole operation,
    /// so edits apply one at a time, in arrival order.
    pub store: Arc<Mutex<DocumentStore>>,
    /// Rules for empty sections, fixed at startup from config.
    pub policy: ValidationPolicy,
}

impl AppState {
    pub fn new(store: DocumentStore, policy: ValidationPolicy) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            policy,
        }
    }

    pub fn store(&self) -> MutexGuard<'_, DocumentStore> {
        // Mutations cannot panic halfway through a swap, so a poisoned store is still consistent.
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
