//! OpenSearch implementation of the index client.
//!
//! This module provides a concrete implementation of `IndexClient`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchIndexClient;
pub use index_config::{
    get_index_settings, result_window_settings, IndexConfig, DEFAULT_INDEX_NAME,
    MAX_RESULT_WINDOW,
};
