//! OpenSearch request builders and response parsers.
//!
//! Everything here is pure so request shaping can be tested without a cluster.

use opensearch::params::Refresh;
use serde_json::{json, Map, Value};

use content_mapping_shared::{IndexDocument, IndexedObject, ID_FIELD};

use crate::errors::IndexError;
use crate::types::{SelectQuery, SelectResult, UpdateCommand, UpdateRequest};

/// Translate a filter expression into a query clause.
///
/// `field:value` becomes an exact `term` match on `field`, so values with
/// spaces or query syntax characters are matched literally. Anything else is
/// handed to `query_string`.
pub fn build_filter(filter: &str) -> Value {
    match filter.split_once(':') {
        Some((field, value)) if is_field_name(field) && !value.is_empty() => {
            json!({ "term": { field: value } })
        }
        _ => json!({ "query_string": { "query": filter } }),
    }
}

fn is_field_name(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Build the search body for a select query.
pub fn build_select_body(query: &SelectQuery) -> Value {
    let mut body = json!({
        "query": build_filter(&query.query),
        "from": query.start,
        "size": query.rows,
        "track_total_hits": true
    });

    if !query.fields.is_empty() {
        body["_source"] = json!(query.fields);
    }

    if !query.sort.is_empty() {
        let sort: Vec<Value> = query
            .sort
            .iter()
            .map(|(field, order)| json!({ field.as_str(): { "order": order.as_str() } }))
            .collect();
        body["sort"] = Value::Array(sort);
    }

    body
}

/// Parse a search response into a select result.
pub fn parse_select_response(body: &Value) -> Result<SelectResult, IndexError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| IndexError::parse("Search response has no hits"))?;

    // `hits.total` is an object since OpenSearch 1.0 but a bare number on
    // older clusters
    let num_found = match hits.get("total") {
        Some(Value::Number(total)) => total.as_u64(),
        Some(total) => total.get("value").and_then(Value::as_u64),
        None => None,
    }
    .ok_or_else(|| IndexError::parse("Search response has no total hit count"))?;

    let documents = hits
        .get("hits")
        .and_then(Value::as_array)
        .map(|hits| hits.iter().map(parse_hit).collect::<Result<Vec<_>, _>>())
        .transpose()?
        .unwrap_or_default();

    Ok(SelectResult::new(num_found, documents))
}

/// Parse a single search hit into a document.
///
/// The `id` field is filled from `_id` when the stored source lacks it.
fn parse_hit(hit: &Value) -> Result<IndexDocument, IndexError> {
    let source = match hit.get("_source") {
        Some(Value::Object(source)) => source.clone(),
        Some(other) => {
            return Err(IndexError::parse(format!(
                "Search hit has a non-object _source: {}",
                other
            )))
        }
        None => Map::new(),
    };

    let mut document = IndexDocument::from_fields(source);
    if document.get(ID_FIELD).is_none() {
        if let Some(id) = hit.get("_id") {
            document.set(ID_FIELD, id.clone());
        }
    }

    Ok(document)
}

/// Build the newline-delimited bulk body for an update request.
///
/// Commit commands do not produce body lines; they are expressed through the
/// bulk request's `refresh` parameter.
pub fn build_bulk_body(index: &str, request: &UpdateRequest<'_>) -> Result<Vec<Value>, IndexError> {
    let mut body = Vec::new();

    for command in request.commands() {
        match command {
            UpdateCommand::DeleteByIds(ids) => {
                for id in ids.iter() {
                    body.push(json!({ "delete": { "_index": index, "_id": id.to_string() } }));
                }
            }
            UpdateCommand::AddDocuments(documents) => {
                for document in documents.iter() {
                    let id = document.document_key().ok_or_else(|| {
                        IndexError::validation("Document has no id field and cannot be indexed")
                    })?;
                    body.push(json!({ "index": { "_index": index, "_id": id.to_string() } }));
                    body.push(Value::Object(document.fields().clone()));
                }
            }
            UpdateCommand::Commit => {}
        }
    }

    Ok(body)
}

/// What the client has to send for one update request.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePlan {
    /// Nothing to write and no commit.
    Skip,
    /// Commit only: refresh the index without a bulk call.
    RefreshOnly,
    /// One bulk call, refreshed when the request carries a commit.
    Bulk { lines: Vec<Value>, refresh: Refresh },
}

/// Decide how an update request is executed against `index`.
pub fn plan_update(index: &str, request: &UpdateRequest<'_>) -> Result<UpdatePlan, IndexError> {
    let lines = build_bulk_body(index, request)?;
    let commit = request.has_commit();

    Ok(match (lines.is_empty(), commit) {
        (true, false) => UpdatePlan::Skip,
        (true, true) => UpdatePlan::RefreshOnly,
        (false, true) => UpdatePlan::Bulk {
            lines,
            refresh: Refresh::True,
        },
        (false, false) => UpdatePlan::Bulk {
            lines,
            refresh: Refresh::False,
        },
    })
}

/// Fail if a bulk response reports any item failure.
///
/// `errors: true` is a failure even when no item carries an error object.
pub fn check_bulk_response(body: &Value) -> Result<(), IndexError> {
    let has_errors = body.get("errors").and_then(Value::as_bool).unwrap_or(false);
    if !has_errors {
        return Ok(());
    }

    let failures = bulk_failures(body);
    if failures.is_empty() {
        return Err(IndexError::bulk_operation(
            "Bulk response reported errors without item details",
        ));
    }

    Err(IndexError::bulk_operation(format!(
        "{} bulk items failed: {}",
        failures.len(),
        failures.join("; ")
    )))
}

/// Collect the per-item failures of a bulk response.
pub fn bulk_failures(body: &Value) -> Vec<String> {
    let has_errors = body.get("errors").and_then(Value::as_bool).unwrap_or(false);
    if !has_errors {
        return Vec::new();
    }

    body.get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object()?.values().next())
                .filter_map(|result| {
                    let error = result.get("error")?;
                    let id = result.get("_id").and_then(Value::as_str).unwrap_or("?");
                    let reason = error
                        .get("reason")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string());
                    Some(format!("{}: {}", id, reason))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortOrder;
    use content_mapping_shared::{normalize_object_class, DocumentId};

    #[test]
    fn test_build_select_body() {
        let query = SelectQuery::new("objectclass:App-Article")
            .with_start(0)
            .with_rows(1_000_000)
            .with_fields(["id", "objectid", "objectclass", "hash"])
            .add_sort("objectid", SortOrder::Asc);

        let body = build_select_body(&query);

        assert_eq!(
            body,
            json!({
                "query": { "term": { "objectclass": "App-Article" } },
                "from": 0,
                "size": 1_000_000,
                "track_total_hits": true,
                "_source": ["id", "objectid", "objectclass", "hash"],
                "sort": [{ "objectid": { "order": "asc" } }]
            })
        );
    }

    #[test]
    fn test_filter_with_spaces_is_an_exact_match() {
        let filter = format!("objectclass:{}", normalize_object_class("arbitrary type"));

        let body = build_select_body(&SelectQuery::new(filter));

        assert_eq!(body["query"], json!({ "term": { "objectclass": "arbitrary type" } }));
    }

    #[test]
    fn test_filter_with_query_syntax_characters() {
        let filter = "objectclass:std-collections-HashMap<u8, String>";

        assert_eq!(
            build_filter(filter),
            json!({ "term": { "objectclass": "std-collections-HashMap<u8, String>" } })
        );
    }

    #[test]
    fn test_filter_value_may_contain_colons() {
        assert_eq!(
            build_filter("id:Article:5"),
            json!({ "term": { "id": "Article:5" } })
        );
    }

    #[test]
    fn test_free_text_filter_falls_back_to_query_string() {
        assert_eq!(
            build_filter("hello world"),
            json!({ "query_string": { "query": "hello world" } })
        );
        assert_eq!(
            build_filter("objectclass:"),
            json!({ "query_string": { "query": "objectclass:" } })
        );
    }

    #[test]
    fn test_build_select_body_all_fields_unsorted() {
        let body = build_select_body(&SelectQuery::new("type:Article"));

        assert!(body.get("_source").is_none());
        assert!(body.get("sort").is_none());
    }

    #[test]
    fn test_parse_select_response() {
        let response = json!({
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    {
                        "_id": "Article:1",
                        "_source": { "id": "Article:1", "objectid": 1, "objectclass": "Article" }
                    },
                    {
                        "_id": "Article:2",
                        "_source": { "objectid": 2, "objectclass": "Article" }
                    }
                ]
            }
        });

        let result = parse_select_response(&response).unwrap();

        assert_eq!(result.num_found, 42);
        assert_eq!(result.documents.len(), 2);
        assert_eq!(
            result.documents[1].document_key(),
            Some(DocumentId::from("Article:2"))
        );
    }

    #[test]
    fn test_parse_select_response_legacy_total() {
        let response = json!({ "hits": { "total": 3, "hits": [] } });

        let result = parse_select_response(&response).unwrap();

        assert_eq!(result.num_found, 3);
        assert!(result.documents.is_empty());
    }

    #[test]
    fn test_parse_select_response_invalid() {
        assert!(matches!(
            parse_select_response(&json!({ "took": 1 })),
            Err(IndexError::ParseError(_))
        ));
        assert!(matches!(
            parse_select_response(&json!({ "hits": { "hits": [] } })),
            Err(IndexError::ParseError(_))
        ));
    }

    #[test]
    fn test_build_bulk_body() {
        let ids = vec![DocumentId::from("Article:5")];
        let docs = vec![IndexDocument::new()
            .with_field("id", "Article:7")
            .with_field("objectid", 7)];
        let request = UpdateRequest::new()
            .add_delete_by_ids(&ids)
            .add_documents(&docs)
            .add_commit();

        let body = build_bulk_body("content", &request).unwrap();

        assert_eq!(
            body,
            vec![
                json!({ "delete": { "_index": "content", "_id": "Article:5" } }),
                json!({ "index": { "_index": "content", "_id": "Article:7" } }),
                json!({ "id": "Article:7", "objectid": 7 }),
            ]
        );
    }

    #[test]
    fn test_build_bulk_body_rejects_document_without_id() {
        let docs = vec![IndexDocument::new().with_field("objectid", 7)];
        let request = UpdateRequest::new().add_documents(&docs);

        assert!(matches!(
            build_bulk_body("content", &request),
            Err(IndexError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bulk_failures() {
        let ok = json!({ "errors": false, "items": [] });
        assert!(bulk_failures(&ok).is_empty());

        let failed = json!({
            "errors": true,
            "items": [
                { "delete": { "_id": "Article:5", "status": 200 } },
                {
                    "index": {
                        "_id": "Article:7",
                        "status": 400,
                        "error": { "type": "mapper_parsing_exception", "reason": "failed to parse" }
                    }
                }
            ]
        });
        assert_eq!(bulk_failures(&failed), vec!["Article:7: failed to parse"]);
        assert!(matches!(
            check_bulk_response(&failed),
            Err(IndexError::BulkOperationError(_))
        ));
        assert!(check_bulk_response(&ok).is_ok());
    }

    #[test]
    fn test_bulk_errors_without_item_details_fail() {
        let body = json!({
            "errors": true,
            "items": [{ "index": { "_id": "Article:7", "status": 429 } }]
        });

        assert!(bulk_failures(&body).is_empty());
        assert!(matches!(
            check_bulk_response(&body),
            Err(IndexError::BulkOperationError(_))
        ));
    }

    #[test]
    fn test_plan_update_refreshes_bulk_on_commit() {
        let ids = vec![DocumentId::from("Article:5")];
        let request = UpdateRequest::new().add_delete_by_ids(&ids).add_commit();

        let plan = plan_update("content", &request).unwrap();

        assert_eq!(
            plan,
            UpdatePlan::Bulk {
                lines: vec![json!({ "delete": { "_index": "content", "_id": "Article:5" } })],
                refresh: Refresh::True,
            }
        );
    }

    #[test]
    fn test_plan_update_without_commit_does_not_refresh() {
        let docs = vec![IndexDocument::new().with_field("id", "Article:7")];
        let request = UpdateRequest::new().add_documents(&docs);

        match plan_update("content", &request).unwrap() {
            UpdatePlan::Bulk { lines, refresh } => {
                assert_eq!(lines.len(), 2);
                assert_eq!(refresh, Refresh::False);
            }
            other => panic!("expected a bulk plan, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_update_commit_only_refreshes_index() {
        let request = UpdateRequest::new().add_commit();

        assert_eq!(
            plan_update("content", &request).unwrap(),
            UpdatePlan::RefreshOnly
        );
    }

    #[test]
    fn test_plan_update_empty_request_is_skipped() {
        assert_eq!(
            plan_update("content", &UpdateRequest::new()).unwrap(),
            UpdatePlan::Skip
        );
    }
}
