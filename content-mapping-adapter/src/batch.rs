//! Pending batch accumulation.

use std::collections::HashSet;

use content_mapping_shared::{DocumentId, IndexDocument};

/// Writes and deletes recorded since the last successful flush.
///
/// Documents are kept in the order they were recorded. Deletes form a set:
/// a key queued twice is sent once, in first-seen order. The same key may
/// sit in both collections; a flush sends deletes before writes, so the
/// write wins.
#[derive(Debug, Default)]
pub struct PendingBatch {
    writes: Vec<IndexDocument>,
    deletes: Vec<DocumentId>,
    queued_deletes: HashSet<DocumentId>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a document to be added or replaced.
    pub fn push_write(&mut self, document: IndexDocument) {
        self.writes.push(document);
    }

    /// Queue a document key for deletion.
    ///
    /// Returns `false` if the key was already queued.
    pub fn push_delete(&mut self, id: DocumentId) -> bool {
        if !self.queued_deletes.insert(id.clone()) {
            return false;
        }
        self.deletes.push(id);
        true
    }

    pub fn writes(&self) -> &[IndexDocument] {
        &self.writes
    }

    pub fn deletes(&self) -> &[DocumentId] {
        &self.deletes
    }

    /// Number of pending operations, deletes and writes combined.
    pub fn len(&self) -> usize {
        self.writes.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.deletes.is_empty()
    }

    /// Drop every pending operation.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.deletes.clear();
        self.queued_deletes.clear();
    }
}
