//! Synchronizer contract.
//!
//! A synchronizer walks the source objects of one type in id order, diffs
//! them against the destination's objects of the same type, and calls back
//! into the destination for every new, changed or vanished object. These
//! traits are what it calls.

use async_trait::async_trait;

use crate::errors::AdapterError;

/// The destination role of a synchronization run.
///
/// Implementations are driven by one synchronization loop at a time; every
/// mutating operation takes `&mut self`.
#[async_trait]
pub trait DestinationAdapter: Send + Sync {
    /// The destination system's representation of one object.
    type Object: Send;

    /// A finite, single-pass snapshot of existing objects.
    type Objects: Iterator<Item = Self::Object> + Send;

    /// Enumerate all existing objects of `object_class`, ascending by id.
    async fn objects_ordered_by_id(&self, object_class: &str)
        -> Result<Self::Objects, AdapterError>;

    /// The numeric identity of an object.
    fn id_of(&self, object: &Self::Object) -> Result<i64, AdapterError>;

    /// Create a new, empty object for the given id and class.
    ///
    /// The object does not exist in the destination until it is passed to
    /// `updated` and the batch containing it is flushed.
    fn create_object(&self, id: i64, object_class: &str) -> Self::Object;

    /// Mark an object for deletion.
    fn delete(&mut self, object: &Self::Object) -> Result<(), AdapterError>;

    /// Record that an object was created or changed and must be written.
    ///
    /// Called for new objects and for changed objects only; detecting
    /// no-op updates is the caller's job.
    fn updated(&mut self, object: Self::Object);

    /// Persist everything recorded so far.
    async fn commit(&mut self) -> Result<(), AdapterError>;
}

/// Receives a callback after every processed object.
#[async_trait]
pub trait ProgressListener: Send {
    /// Called once per processed object.
    async fn after_object_processed(&mut self) -> Result<(), AdapterError>;
}

/// A destination that hands out a separate, mutable copy for updates.
pub trait UpdateableObjectProvider: DestinationAdapter {
    /// Create the object that the mapping function may mutate, seeded from
    /// `object` as returned by `objects_ordered_by_id`. The original is left
    /// untouched.
    fn prepare_update(&self, object: &Self::Object) -> Self::Object;
}
