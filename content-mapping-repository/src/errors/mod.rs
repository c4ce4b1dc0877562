//! Error types for the content-mapping repository.

mod index_error;

pub use index_error::IndexError;
