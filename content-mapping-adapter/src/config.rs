//! Configuration types for the destination adapter.

use content_mapping_repository::MAX_RESULT_WINDOW;
use content_mapping_shared::{HASH_FIELD, ID_FIELD, OBJECT_CLASS_FIELD, OBJECT_ID_FIELD};

use crate::errors::AdapterError;

/// Configuration for the destination adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Number of pending deletes plus writes that triggers a flush after an
    /// object has been processed. A value of 1 flushes after every object.
    pub batch_size: usize,
    /// Page size used when enumerating existing objects. Large enough to be
    /// treated as "all matching documents", but no larger than the index's
    /// result window.
    pub max_rows: usize,
    /// Fields fetched when enumerating existing objects. Empty means all fields.
    pub fields: Vec<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_rows: MAX_RESULT_WINDOW,
            fields: [ID_FIELD, OBJECT_ID_FIELD, OBJECT_CLASS_FIELD, HASH_FIELD]
                .iter()
                .map(|field| field.to_string())
                .collect(),
        }
    }
}

impl AdapterConfig {
    /// Create a config that flushes after every processed object.
    pub fn immediate() -> Self {
        Self::with_batch_size(1)
    }

    /// Create a config with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Self::default()
        }
    }

    /// Fetch every stored field when enumerating existing objects.
    pub fn with_all_fields(mut self) -> Self {
        self.fields.clear();
        self
    }

    /// Check the settings before an adapter is built from them.
    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.batch_size == 0 {
            return Err(AdapterError::configuration("batch_size must be at least 1"));
        }
        if self.max_rows == 0 {
            return Err(AdapterError::configuration("max_rows must be at least 1"));
        }
        if self.max_rows > MAX_RESULT_WINDOW {
            return Err(AdapterError::configuration(format!(
                "max_rows must not exceed the index result window of {}",
                MAX_RESULT_WINDOW
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();

        assert_eq!(config.batch_size, 20);
        assert_eq!(config.max_rows, 1_000_000);
        assert_eq!(config.fields, vec!["id", "objectid", "objectclass", "hash"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_immediate() {
        assert_eq!(AdapterConfig::immediate().batch_size, 1);
    }

    #[test]
    fn test_with_all_fields() {
        assert!(AdapterConfig::default().with_all_fields().fields.is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert!(matches!(
            AdapterConfig::with_batch_size(0).validate(),
            Err(AdapterError::ConfigurationError(_))
        ));

        let config = AdapterConfig {
            max_rows: 0,
            ..AdapterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AdapterError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_page_larger_than_result_window() {
        let config = AdapterConfig {
            max_rows: 5_000_000,
            ..AdapterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AdapterError::ConfigurationError(_))
        ));

        let config = AdapterConfig {
            max_rows: MAX_RESULT_WINDOW,
            ..AdapterConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
