//! Request and result types for index client operations.

use content_mapping_shared::{DocumentId, IndexDocument};

/// Sort direction for a select query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// The direction as understood by the search engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A select query against the index.
///
/// The query string is a simple field-equality term such as
/// `objectclass:App-Article`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// Filter expression passed through to the search engine.
    pub query: String,
    /// Offset of the first row to return.
    pub start: usize,
    /// Maximum number of rows to return.
    pub rows: usize,
    /// Fields to return. Empty means all fields.
    pub fields: Vec<String>,
    /// Sort clauses, applied in order.
    pub sort: Vec<(String, SortOrder)>,
}

impl SelectQuery {
    /// Default page size when none is set.
    pub const DEFAULT_ROWS: usize = 10;

    /// Create a query for the given filter expression.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start: 0,
            rows: Self::DEFAULT_ROWS,
            fields: Vec::new(),
            sort: Vec::new(),
        }
    }

    /// Set the start offset.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Set the maximum number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Restrict the returned fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a sort clause.
    pub fn add_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((field.into(), order));
        self
    }
}

/// Result of a select query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectResult {
    /// Total number of matching documents in the index.
    pub num_found: u64,
    /// The returned page of documents.
    pub documents: Vec<IndexDocument>,
}

impl SelectResult {
    pub fn new(num_found: u64, documents: Vec<IndexDocument>) -> Self {
        Self {
            num_found,
            documents,
        }
    }
}

impl IntoIterator for SelectResult {
    type Item = IndexDocument;
    type IntoIter = std::vec::IntoIter<IndexDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

/// One command of an update request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateCommand<'a> {
    /// Delete the documents with these keys.
    DeleteByIds(&'a [DocumentId]),
    /// Add (or replace) these documents.
    AddDocuments(&'a [IndexDocument]),
    /// Make all preceding commands visible to reads.
    Commit,
}

/// An update request: an ordered list of commands sent in one round-trip.
///
/// The request borrows the ids and documents it carries, so the caller keeps
/// ownership until the request has been executed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest<'a> {
    commands: Vec<UpdateCommand<'a>>,
}

impl<'a> UpdateRequest<'a> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a delete-by-ids command.
    pub fn add_delete_by_ids(mut self, ids: &'a [DocumentId]) -> Self {
        self.commands.push(UpdateCommand::DeleteByIds(ids));
        self
    }

    /// Append an add-documents command.
    pub fn add_documents(mut self, documents: &'a [IndexDocument]) -> Self {
        self.commands.push(UpdateCommand::AddDocuments(documents));
        self
    }

    /// Append a commit command.
    pub fn add_commit(mut self) -> Self {
        self.commands.push(UpdateCommand::Commit);
        self
    }

    /// The commands in the order they were added.
    pub fn commands(&self) -> &[UpdateCommand<'a>] {
        &self.commands
    }

    /// Whether the request carries a commit command.
    pub fn has_commit(&self) -> bool {
        self.commands
            .iter()
            .any(|command| matches!(command, UpdateCommand::Commit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_query_builder() {
        let query = SelectQuery::new("objectclass:Article")
            .with_start(0)
            .with_rows(1_000_000)
            .with_fields(["id", "objectid"])
            .add_sort("objectid", SortOrder::Asc);

        assert_eq!(query.query, "objectclass:Article");
        assert_eq!(query.rows, 1_000_000);
        assert_eq!(query.fields, vec!["id".to_string(), "objectid".to_string()]);
        assert_eq!(query.sort, vec![("objectid".to_string(), SortOrder::Asc)]);
    }

    #[test]
    fn test_select_query_defaults() {
        let query = SelectQuery::new("type:Article");

        assert_eq!(query.start, 0);
        assert_eq!(query.rows, SelectQuery::DEFAULT_ROWS);
        assert!(query.fields.is_empty());
        assert!(query.sort.is_empty());
    }

    #[test]
    fn test_update_request_keeps_command_order() {
        let ids = vec![DocumentId::from("Article:1")];
        let docs = vec![IndexDocument::new().with_field("id", "Article:2")];

        let request = UpdateRequest::new()
            .add_delete_by_ids(&ids)
            .add_documents(&docs)
            .add_commit();

        assert_eq!(
            request.commands(),
            &[
                UpdateCommand::DeleteByIds(&ids),
                UpdateCommand::AddDocuments(&docs),
                UpdateCommand::Commit,
            ]
        );
        assert!(request.has_commit());
    }

    #[test]
    fn test_empty_update_request() {
        let request = UpdateRequest::new();

        assert!(request.commands().is_empty());
        assert!(!request.has_commit());
    }

    #[test]
    fn test_select_result_into_iter() {
        let result = SelectResult::new(
            2,
            vec![
                IndexDocument::new().with_field("objectid", 1),
                IndexDocument::new().with_field("objectid", 2),
            ],
        );

        let ids: Vec<_> = result
            .into_iter()
            .filter_map(|doc| doc.get("objectid").and_then(|v| v.as_i64()))
            .collect();

        assert_eq!(ids, vec![1, 2]);
    }
}
