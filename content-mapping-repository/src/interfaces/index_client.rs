//! Index client trait definition.
//!
//! This module defines the abstract interface the destination adapter issues
//! its reads and writes against, allowing for different backend
//! implementations (OpenSearch, Solr, mock, etc.).

use async_trait::async_trait;

use crate::errors::IndexError;
use crate::types::{SelectQuery, SelectResult, UpdateRequest};

/// Abstract interface for search index reads and batched writes.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, IndexError>`. Implementations never retry;
/// retry policy belongs to the caller.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Execute a select query against the index.
    ///
    /// # Arguments
    ///
    /// * `query` - Filter expression, paging, field list and sort clauses
    ///
    /// # Returns
    ///
    /// * `Ok(SelectResult)` - The total hit count and the requested page of documents
    /// * `Err(IndexError)` - If the query fails
    async fn select(&self, query: &SelectQuery) -> Result<SelectResult, IndexError>;

    /// Execute an update request in a single round-trip.
    ///
    /// Commands are applied in order: deletes, then document adds, then the
    /// commit that makes them visible to reads.
    ///
    /// # Arguments
    ///
    /// * `request` - The ordered delete/add/commit commands
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every command succeeded
    /// * `Err(IndexError)` - If any command failed; no partial success is reported
    async fn update(&self, request: &UpdateRequest<'_>) -> Result<(), IndexError>;
}
