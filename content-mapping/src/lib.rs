//! # Content Mapping
//!
//! Bootstrap library for synchronizing mapped content into a search index.
//!
//! This crate reads settings from the environment, installs the tracing
//! subscriber, and wires the OpenSearch index client into a ready
//! destination adapter for a synchronizer to drive.

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, LogFormat, Settings};
pub use content_mapping_adapter as adapter;
pub use content_mapping_repository as repository;
pub use content_mapping_shared as shared;

use thiserror::Error;

/// Errors that can occur while setting up the destination.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Adapter construction error.
    #[error("Adapter error: {0}")]
    AdapterError(#[from] content_mapping_adapter::AdapterError),

    /// Index client error.
    #[error("Index error: {0}")]
    IndexError(#[from] content_mapping_repository::IndexError),
}

impl SetupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
