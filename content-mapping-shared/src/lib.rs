//! # Content Mapping Shared
//!
//! Types shared by the content-mapping crates: the indexed document
//! representation, document identifiers, and the key normalization scheme
//! that maps domain objects onto index document keys.

pub mod document;
pub mod keys;

pub use document::{
    DocumentId, IndexDocument, IndexedObject, HASH_FIELD, ID_FIELD, OBJECT_CLASS_FIELD,
    OBJECT_ID_FIELD,
};
pub use keys::{composite_key, normalize_object_class};
