//! Dependency initialization and wiring for the search index destination.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::SetupError;
use content_mapping_adapter::SearchIndexDestinationAdapter;
use content_mapping_repository::OpenSearchIndexClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The destination adapter, ready to be driven by a synchronizer.
    pub adapter: SearchIndexDestinationAdapter,
    /// The index client the adapter writes through.
    pub client: Arc<OpenSearchIndexClient>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`Settings::from_env`] for the variables read.
    pub async fn new() -> Result<Self, SetupError> {
        let settings = Settings::from_env()?;
        Self::from_settings(&settings).await
    }

    /// Initialize all dependencies from explicit settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(SetupError)` - If the settings are invalid or the index is unreachable
    pub async fn from_settings(settings: &Settings) -> Result<Self, SetupError> {
        let adapter_config = settings.adapter_config();
        adapter_config.validate()?;

        info!(
            opensearch_url = %settings.opensearch_url,
            index = %settings.index_name,
            batch_size = adapter_config.batch_size,
            "Initializing dependencies"
        );

        let client = OpenSearchIndexClient::new(&settings.opensearch_url, settings.index_config())
            .await
            .map_err(|e| SetupError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let healthy = client
            .health_check()
            .await
            .map_err(|e| SetupError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(SetupError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        client.ensure_index_exists().await?;

        let client = Arc::new(client);
        let adapter = SearchIndexDestinationAdapter::with_config(client.clone(), adapter_config)?;

        Ok(Self { adapter, client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_mapping_adapter::AdapterError;

    #[tokio::test]
    async fn test_invalid_batch_size_fails_before_connecting() {
        let settings = Settings {
            batch_size: 0,
            ..Settings::default()
        };

        let result = Dependencies::from_settings(&settings).await;

        assert!(matches!(
            result,
            Err(SetupError::AdapterError(AdapterError::ConfigurationError(_)))
        ));
    }

    #[tokio::test]
    async fn test_page_larger_than_result_window_fails_before_connecting() {
        let settings = Settings {
            max_rows: 5_000_000,
            ..Settings::default()
        };

        let result = Dependencies::from_settings(&settings).await;

        assert!(matches!(
            result,
            Err(SetupError::AdapterError(AdapterError::ConfigurationError(_)))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_config_error() {
        let settings = Settings {
            opensearch_url: "not a url".to_string(),
            ..Settings::default()
        };

        let result = Dependencies::from_settings(&settings).await;

        assert!(matches!(result, Err(SetupError::ConfigError(_))));
    }
}
