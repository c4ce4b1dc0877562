//! # Content Mapping Adapter
//!
//! This crate provides the destination side of a content-mapping
//! synchronization run: an adapter that enumerates the objects already in a
//! search index and turns the synchronizer's create/update/delete decisions
//! into batched index writes.
//!
//! ## Flow
//!
//! 1. **Enumerate**: existing documents of one object class, ascending by object id
//! 2. **Accumulate**: `delete` and `updated` calls queue work in a pending batch
//! 3. **Flush**: once per processed object the batch size is checked; reaching
//!    the threshold sends deletes, adds and a commit in one update request
//! 4. **Commit**: the synchronizer's final `commit` flushes whatever is left

pub mod adapter;
pub mod batch;
pub mod config;
pub mod errors;
pub mod interfaces;

pub use adapter::{ExistingObjects, SearchIndexDestinationAdapter};
pub use batch::PendingBatch;
pub use config::AdapterConfig;
pub use errors::AdapterError;
pub use interfaces::{
    DestinationAdapter, Notification, NotificationSink, ProgressListener, TracingSink,
    UpdateableObjectProvider,
};
