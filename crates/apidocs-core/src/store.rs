//! Published document sets.
//!
//! A [`DocumentSet`] is immutable once built. [`DocumentStore`] publishes one
//! set at a time behind an `Arc`; readers take a snapshot and never see a
//! half-built set, and a rebuild swaps the whole set at once.

use std::sync::Arc;

use indexmap::IndexMap;
use log::{info, warn};
use parking_lot::RwLock;

use crate::config::ServiceConfig;
use crate::document::SpecDocument;
use crate::endpoint::EndpointTable;
use crate::error::BuildError;
use crate::pipeline;

/// Every generated document, keyed by group name, with its endpoint table.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSet {
    documents: IndexMap<String, Arc<SpecDocument>>,
    endpoints: EndpointTable,
}

impl DocumentSet {
    pub fn new(documents: IndexMap<String, Arc<SpecDocument>>, endpoints: EndpointTable) -> Self {
        Self {
            documents,
            endpoints,
        }
    }

    pub fn get(&self, group_name: &str) -> Option<&Arc<SpecDocument>> {
        self.documents.get(group_name)
    }

    pub fn documents(&self) -> impl Iterator<Item = (&str, &Arc<SpecDocument>)> {
        self.documents.iter().map(|(name, doc)| (name.as_str(), doc))
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Holder of the currently published [`DocumentSet`].
#[derive(Debug)]
pub struct DocumentStore {
    current: RwLock<Arc<DocumentSet>>,
}

impl DocumentStore {
    pub fn new(set: DocumentSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// Build from config; fails instead of publishing a partial set.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, BuildError> {
        Ok(Self::new(pipeline::generate(config)?))
    }

    /// Snapshot of the published set.
    pub fn load(&self) -> Arc<DocumentSet> {
        self.current.read().clone()
    }

    /// Regenerate from config and publish the result.
    ///
    /// The new set is built completely before the swap. On failure the
    /// published set stays in place.
    pub fn rebuild(&self, config: &ServiceConfig) -> Result<Arc<DocumentSet>, BuildError> {
        match pipeline::generate(config) {
            Ok(set) => {
                let count = set.len();
                let published = Arc::new(set);
                *self.current.write() = Arc::clone(&published);
                info!("published {count} documents");
                Ok(published)
            }
            Err(e) => {
                warn!("rebuild rejected, keeping previous documents: {e}");
                Err(e)
            }
        }
    }
}
