//! Document store. Owns the live document, the last validation errors, and
//! the ready flag, and mirrors every document change into storage.
//!
//! Every edit builds a new `ResumeDocument` and swaps it in whole. Each swap
//! costs exactly one storage write, unchanged values included; `load` and
//! edits that match no entry cost none.
//! Storage failures never reach the caller: reads fall back to the empty
//! document, writes are best-effort and only logged.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::resume::{new_entry_id, EntryField, EntryKind, ResumeDocument, TextField};
use crate::resume::merge::merge_over_default;
use crate::resume::validation::ErrorMap;
use crate::storage::KeyValueStorage;

pub struct DocumentStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    document: ResumeDocument,
    errors: ErrorMap,
    ready: bool,
}

impl DocumentStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            document: ResumeDocument::default(),
            errors: ErrorMap::new(),
            ready: false,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Restores the persisted document over the default. Runs once; never fails.
    pub fn load(&mut self) {
        if self.ready {
            debug!("Document store already loaded");
            return;
        }

        match self.storage.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<serde_json::Value>(&raw)
                .ok()
                .and_then(|value| merge_over_default(&value))
            {
                Some(document) => {
                    info!(
                        "Restored document ({} experience, {} education entries)",
                        document.experience.len(),
                        document.education.len()
                    );
                    self.document = document;
                }
                None => warn!("Stored document under '{}' is unreadable; starting empty", self.key),
            },
            Ok(None) => info!("No stored document under '{}'; starting empty", self.key),
            Err(e) => warn!("Failed to read stored document: {e}; starting empty"),
        }

        self.ready = true;
    }

    /// Swaps in `document` and persists it. Leaves the error map alone.
    pub fn replace(&mut self, document: ResumeDocument) {
        self.document = document;
        self.persist();
    }

    pub fn update_field(&mut self, field: TextField, value: impl Into<String>) {
        let next = self.document.with_field(field, value);
        self.replace(next);
    }

    /// Appends a blank entry and returns its new identifier.
    pub fn add_entry(&mut self, kind: EntryKind) -> String {
        let existing = self.document.entry_ids(kind);
        let id = loop {
            let id = new_entry_id();
            if !existing.contains(&id.as_str()) {
                break id;
            }
        };
        let next = self.document.with_new_entry(kind, id.clone());
        self.replace(next);
        id
    }

    /// `false` (and no write) when no entry of `kind` has `id`.
    pub fn update_entry(
        &mut self,
        kind: EntryKind,
        id: &str,
        field: EntryField,
        value: impl Into<String>,
    ) -> bool {
        match self.document.with_entry_field(kind, id, field, value) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    /// `false` (and no write) when no entry of `kind` has `id`.
    pub fn remove_entry(&mut self, kind: EntryKind, id: &str) -> bool {
        match self.document.without_entry(kind, id) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    /// Back to the empty document with no errors, and nothing left in storage.
    pub fn reset(&mut self) {
        self.document = ResumeDocument::default();
        self.errors = ErrorMap::new();
        if let Err(e) = self.storage.remove(&self.key) {
            warn!("Failed to clear stored document: {e}");
        }
        info!("Document store reset");
    }

    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ErrorMap::new();
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.document) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize document: {e}");
                return;
            }
        };
        match self.storage.set(&self.key, &raw) {
            Ok(()) => debug!("Persisted document ({} bytes)", raw.len()),
            Err(e) => warn!("Failed to persist document: {e}"),
        }
    }
}
