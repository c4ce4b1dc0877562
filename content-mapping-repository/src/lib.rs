//! # Content Mapping Repository
//!
//! This crate provides the index client abstraction used by the
//! content-mapping destination adapter. It includes the request and result
//! types, the error type, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use errors::IndexError;
pub use interfaces::IndexClient;
pub use opensearch::{IndexConfig, OpenSearchIndexClient, DEFAULT_INDEX_NAME, MAX_RESULT_WINDOW};
pub use types::{SelectQuery, SelectResult, SortOrder, UpdateCommand, UpdateRequest};
