//! Environment-driven settings.

use std::env;
use std::str::FromStr;

use crate::SetupError;
use content_mapping_adapter::AdapterConfig;
use content_mapping_repository::{IndexConfig, DEFAULT_INDEX_NAME};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(SetupError::config(format!("Unknown LOG_FORMAT: {}", other))),
        }
    }
}

/// Settings for the search index destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// OpenSearch server URL.
    pub opensearch_url: String,
    /// Index the adapter reads from and writes to.
    pub index_name: String,
    /// Pending operations that trigger a flush.
    pub batch_size: usize,
    /// Page size used to enumerate existing objects.
    pub max_rows: usize,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let adapter = AdapterConfig::default();
        Self {
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            batch_size: adapter.batch_size,
            max_rows: adapter.max_rows,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Read settings from the environment, loading `.env` first if present.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `CONTENT_MAPPING_INDEX`: index name (default: content)
    /// - `CONTENT_MAPPING_BATCH_SIZE`: flush threshold (default: 20)
    /// - `CONTENT_MAPPING_MAX_ROWS`: enumeration page size (default: 1000000)
    /// - `LOG_FORMAT`: `json` or `pretty` (default: pretty)
    pub fn from_env() -> Result<Self, SetupError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SetupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let parse_count = |key: &str, default: usize| -> Result<usize, SetupError> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|e| SetupError::config(format!("Invalid {}={:?}: {}", key, raw, e))),
                None => Ok(default),
            }
        };

        Ok(Self {
            opensearch_url: lookup("OPENSEARCH_URL").unwrap_or(defaults.opensearch_url),
            index_name: lookup("CONTENT_MAPPING_INDEX").unwrap_or(defaults.index_name),
            batch_size: parse_count("CONTENT_MAPPING_BATCH_SIZE", defaults.batch_size)?,
            max_rows: parse_count("CONTENT_MAPPING_MAX_ROWS", defaults.max_rows)?,
            log_format: lookup("LOG_FORMAT")
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or(defaults.log_format),
        })
    }

    /// Adapter configuration derived from these settings.
    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            batch_size: self.batch_size,
            max_rows: self.max_rows,
            ..AdapterConfig::default()
        }
    }

    /// Index configuration derived from these settings.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::new(self.index_name.clone())
    }
}
