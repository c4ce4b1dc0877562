//! Batching destination adapter for a search index.
//!
//! Enumerates the documents already indexed for an object class and turns
//! the synchronizer's delete/update decisions into batched update requests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::batch::PendingBatch;
use crate::config::AdapterConfig;
use crate::errors::AdapterError;
use crate::interfaces::{
    DestinationAdapter, Notification, NotificationSink, ProgressListener, TracingSink,
    UpdateableObjectProvider,
};
use content_mapping_repository::{
    IndexClient, SelectQuery, SelectResult, SortOrder, UpdateRequest,
};
use content_mapping_shared::{
    composite_key, normalize_object_class, DocumentId, IndexDocument, IndexedObject, ID_FIELD,
    OBJECT_CLASS_FIELD, OBJECT_ID_FIELD,
};

/// Snapshot of the documents found for one object class.
///
/// Finite and single-pass; reflects the index at query time.
#[derive(Debug)]
pub struct ExistingObjects {
    num_found: u64,
    documents: std::vec::IntoIter<IndexDocument>,
}

impl ExistingObjects {
    fn new(result: SelectResult) -> Self {
        Self {
            num_found: result.num_found,
            documents: result.into_iter(),
        }
    }

    /// Total number of matching documents reported by the index.
    pub fn num_found(&self) -> u64 {
        self.num_found
    }
}

impl Iterator for ExistingObjects {
    type Item = IndexDocument;

    fn next(&mut self) -> Option<Self::Item> {
        self.documents.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.documents.size_hint()
    }
}

impl ExactSizeIterator for ExistingObjects {}

/// Destination adapter that batches writes against a search index.
///
/// The adapter is responsible for:
/// - Enumerating existing documents of an object class in object id order
/// - Creating documents keyed by normalized class and object id
/// - Accumulating deletes and writes until the batch size is reached
/// - Flushing a batch as one delete/add/commit update request
///
/// A failed flush leaves the pending batch untouched; retrying is up to the
/// caller.
pub struct SearchIndexDestinationAdapter {
    client: Arc<dyn IndexClient>,
    config: AdapterConfig,
    sink: Box<dyn NotificationSink>,
    batch: PendingBatch,
}

impl SearchIndexDestinationAdapter {
    /// Create a new adapter with the default configuration.
    pub fn new(client: Arc<dyn IndexClient>) -> Self {
        Self {
            client,
            config: AdapterConfig::default(),
            sink: Box::new(TracingSink),
            batch: PendingBatch::new(),
        }
    }

    /// Create a new adapter with custom configuration.
    pub fn with_config(
        client: Arc<dyn IndexClient>,
        config: AdapterConfig,
    ) -> Result<Self, AdapterError> {
        config.validate()?;
        Ok(Self {
            client,
            config,
            sink: Box::new(TracingSink),
            batch: PendingBatch::new(),
        })
    }

    /// Replace the notification sink.
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Documents waiting to be added or replaced.
    pub fn pending_writes(&self) -> &[IndexDocument] {
        self.batch.writes()
    }

    /// Document keys waiting to be deleted.
    pub fn pending_deletes(&self) -> &[DocumentId] {
        self.batch.deletes()
    }

    /// Number of pending operations, deletes and writes combined.
    pub fn pending_count(&self) -> usize {
        self.batch.len()
    }

    /// Build the enumeration query for a normalized object class.
    fn existing_objects_query(&self, normalized_class: &str) -> SelectQuery {
        SelectQuery::new(format!("{}:{}", OBJECT_CLASS_FIELD, normalized_class))
            .with_start(0)
            .with_rows(self.config.max_rows)
            .with_fields(self.config.fields.iter().cloned())
            .add_sort(OBJECT_ID_FIELD, SortOrder::Asc)
    }
}

/// Read the numeric object id of any indexed object.
///
/// Integer numbers and numeric strings are accepted.
fn object_id_of<O: IndexedObject + ?Sized>(object: &O) -> Result<i64, AdapterError> {
    match object.field(OBJECT_ID_FIELD) {
        Some(Value::Number(number)) => number.as_i64().ok_or_else(|| {
            AdapterError::malformed_document(format!(
                "{} is not an integer: {}",
                OBJECT_ID_FIELD, number
            ))
        }),
        Some(Value::String(raw)) => raw.trim().parse().map_err(|_| {
            AdapterError::malformed_document(format!(
                "{} is not numeric: {:?}",
                OBJECT_ID_FIELD, raw
            ))
        }),
        Some(other) => Err(AdapterError::malformed_document(format!(
            "{} has unexpected type: {}",
            OBJECT_ID_FIELD, other
        ))),
        None => Err(AdapterError::malformed_document(format!(
            "document has no {} field",
            OBJECT_ID_FIELD
        ))),
    }
}

#[async_trait]
impl DestinationAdapter for SearchIndexDestinationAdapter {
    type Object = IndexDocument;
    type Objects = ExistingObjects;

    #[instrument(skip(self))]
    async fn objects_ordered_by_id(
        &self,
        object_class: &str,
    ) -> Result<ExistingObjects, AdapterError> {
        let normalized_class = normalize_object_class(object_class);
        let query = self.existing_objects_query(&normalized_class);

        let result = self.client.select(&query).await.map_err(|e| {
            error!(error = %e, object_class = %object_class, "Failed to enumerate existing objects");
            AdapterError::query(e)
        })?;

        self.sink.notify(&Notification::ObjectsFound {
            count: result.num_found,
            object_class: object_class.to_string(),
        });

        Ok(ExistingObjects::new(result))
    }

    fn id_of(&self, object: &IndexDocument) -> Result<i64, AdapterError> {
        object_id_of(object)
    }

    fn create_object(&self, id: i64, object_class: &str) -> IndexDocument {
        let normalized_class = normalize_object_class(object_class);

        IndexDocument::new()
            .with_field(ID_FIELD, composite_key(&normalized_class, id))
            .with_field(OBJECT_ID_FIELD, id)
            .with_field(OBJECT_CLASS_FIELD, normalized_class)
    }

    fn delete(&mut self, object: &IndexDocument) -> Result<(), AdapterError> {
        let key = object.document_key().ok_or_else(|| {
            AdapterError::malformed_document(format!("document has no {} field", ID_FIELD))
        })?;

        if !self.batch.push_delete(key) {
            debug!("Document already queued for deletion");
        }
        Ok(())
    }

    fn updated(&mut self, object: IndexDocument) {
        self.batch.push_write(object);
    }

    #[instrument(skip(self))]
    async fn commit(&mut self) -> Result<(), AdapterError> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let writes = self.batch.writes().len();
        let deletes = self.batch.deletes().len();
        self.sink.notify(&Notification::Flushing { writes, deletes });

        {
            let mut request = UpdateRequest::new();
            if deletes > 0 {
                request = request.add_delete_by_ids(self.batch.deletes());
            }
            if writes > 0 {
                request = request.add_documents(self.batch.writes());
            }
            let request = request.add_commit();

            if let Err(e) = self.client.update(&request).await {
                error!(
                    error = %e,
                    writes = writes,
                    deletes = deletes,
                    "Failed to flush pending batch"
                );
                return Err(AdapterError::flush(e));
            }
        }

        self.batch.clear();
        self.sink.notify(&Notification::Flushed);
        Ok(())
    }
}

#[async_trait]
impl ProgressListener for SearchIndexDestinationAdapter {
    async fn after_object_processed(&mut self) -> Result<(), AdapterError> {
        if self.batch.len() >= self.config.batch_size {
            self.commit().await?;
        }
        Ok(())
    }
}

impl UpdateableObjectProvider for SearchIndexDestinationAdapter {
    fn prepare_update(&self, object: &IndexDocument) -> IndexDocument {
        IndexDocument::from_fields(object.fields().clone())
    }
}
