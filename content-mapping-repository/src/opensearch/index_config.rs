//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the content index.

use serde_json::{json, Value};

use content_mapping_shared::{HASH_FIELD, ID_FIELD, OBJECT_CLASS_FIELD, OBJECT_ID_FIELD};

/// Default name of the content index.
pub const DEFAULT_INDEX_NAME: &str = "content";

/// Result window large enough for one "all matching documents" page.
pub const MAX_RESULT_WINDOW: usize = 1_000_000;

/// Which index the client reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Index (or alias) name.
    pub name: String,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

/// Get the index settings and mappings for the content index.
///
/// Identity fields are mapped explicitly so that filtering on `objectclass`
/// is an exact match and sorting on `objectid` is numeric. Everything else a
/// mapping function writes is left to dynamic mapping.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "max_result_window": MAX_RESULT_WINDOW
        },
        "mappings": {
            "properties": {
                ID_FIELD: {
                    "type": "keyword"
                },
                OBJECT_ID_FIELD: {
                    "type": "long"
                },
                OBJECT_CLASS_FIELD: {
                    "type": "keyword"
                },
                HASH_FIELD: {
                    "type": "keyword",
                    "index": false
                }
            }
        }
    })
}

/// Settings update that raises the result window of an existing index.
pub fn result_window_settings() -> Value {
    json!({
        "index": {
            "max_result_window": MAX_RESULT_WINDOW
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert_eq!(
            settings["settings"]["max_result_window"],
            json!(MAX_RESULT_WINDOW)
        );

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["id"]["type"], "keyword");
        assert_eq!(properties["objectid"]["type"], "long");
        assert_eq!(properties["objectclass"]["type"], "keyword");
        assert_eq!(properties["hash"]["type"], "keyword");
    }

    #[test]
    fn test_result_window_settings_match_index_settings() {
        assert_eq!(
            result_window_settings()["index"]["max_result_window"],
            get_index_settings()["settings"]["max_result_window"]
        );
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, "content");
    }
}
