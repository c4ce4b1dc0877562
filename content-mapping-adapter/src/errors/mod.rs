//! Error types for the destination adapter.

use content_mapping_repository::IndexError;
use thiserror::Error;

/// Errors that can occur in the destination adapter.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The adapter was constructed with invalid settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Enumerating existing objects failed.
    #[error("Query error: {0}")]
    QueryError(#[source] IndexError),

    /// Flushing the pending batch failed. The batch is left as it was.
    #[error("Flush error: {0}")]
    FlushError(#[source] IndexError),

    /// A document lacks an identity field or carries an invalid one.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl AdapterError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Wrap an index failure raised while enumerating.
    pub fn query(err: IndexError) -> Self {
        Self::QueryError(err)
    }

    /// Wrap an index failure raised while flushing.
    pub fn flush(err: IndexError) -> Self {
        Self::FlushError(err)
    }

    /// Create a malformed document error.
    pub fn malformed_document(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }
}
