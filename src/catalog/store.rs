//! In-memory catalog collection with the import commit policy.

use crate::catalog::models::CatalogEntry;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The current catalog.
///
/// Imports are wholesale replacements: either the whole prior catalog is
/// swapped for the new non-empty sequence, or nothing changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entries in import order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Returns mutable entries for a pricing pass.
    pub fn entries_mut(&mut self) -> &mut [CatalogEntry] {
        &mut self.entries
    }

    /// Replaces the whole catalog with a parsed sequence.
    ///
    /// An empty sequence is a no-op that leaves the prior catalog untouched.
    /// Returns the number of entries stored (0 on no-op).
    pub fn replace_all(&mut self, entries: Vec<CatalogEntry>) -> usize {
        if entries.is_empty() {
            debug!("Import produced no entries, keeping existing catalog");
            return 0;
        }

        let count = entries.len();
        self.entries = entries;
        info!("Imported {} entries", count);
        count
    }

    /// Appends a manually created entry.
    pub fn add(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
