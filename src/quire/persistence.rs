//! # Persistence Coordinator
//!
//! Moves the [`DocumentCollection`] between memory and a [`StorageBackend`].
//!
//! - Loading never fails: a missing document is the first-run path, and an
//!   unreadable or unparsable one falls back to the seeded collection.
//! - Saving serializes whatever is in memory at the moment of the call and
//!   reports the outcome as a [`SaveReport`]. Failures are logged and
//!   returned, never raised. In-memory state is not touched either way.
//!
//! The coordinator only ever reads the collection.

use crate::codec::json::export_json;
use crate::migrate;
use crate::model::DocumentCollection;
use crate::store::StorageBackend;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub success: bool,
    pub message: Option<String>,
}

impl SaveReport {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A stored document was found and migrated.
    Stored,
    /// Nothing stored yet.
    FirstRun,
    /// Something was stored but could not be used.
    Recovered(String),
}

#[derive(Debug)]
pub struct Loaded {
    pub collection: DocumentCollection,
    pub source: LoadSource,
}

pub struct PersistenceCoordinator<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PersistenceCoordinator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load_on_startup(&self) -> Loaded {
        let raw = match self.backend.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("no stored document at {}, seeding", self.backend.location());
                return seeded(LoadSource::FirstRun);
            }
            Err(e) => {
                tracing::warn!("failed to read {}: {}", self.backend.location(), e);
                return seeded(LoadSource::Recovered(e.to_string()));
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("stored document is not valid JSON: {}", e);
                return seeded(LoadSource::Recovered(e.to_string()));
            }
        };

        let collection = migrate::normalize(&value);
        tracing::info!(
            "loaded {} page(s) from {}",
            collection.pages.len(),
            self.backend.location()
        );
        Loaded {
            collection,
            source: LoadSource::Stored,
        }
    }

    pub fn save(&self, doc: &DocumentCollection) -> SaveReport {
        let serialized = match export_json(doc) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to serialize document: {}", e);
                return SaveReport::failed(e.to_string());
            }
        };

        match self.backend.save(&serialized) {
            Ok(()) => {
                tracing::debug!(
                    "saved {} page(s) to {}",
                    doc.pages.len(),
                    self.backend.location()
                );
                SaveReport::ok()
            }
            Err(e) => {
                tracing::warn!("save to {} failed: {}", self.backend.location(), e);
                SaveReport::failed(e.to_string())
            }
        }
    }
}

fn seeded(source: LoadSource) -> Loaded {
    Loaded {
        collection: DocumentCollection::seeded(),
        source,
    }
}
