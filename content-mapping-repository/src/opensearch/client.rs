//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `IndexClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesExistsParts, IndicesPutSettingsParts, IndicesRefreshParts,
    },
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::IndexError;
use crate::interfaces::IndexClient;
use crate::opensearch::index_config::{get_index_settings, result_window_settings, IndexConfig};
use crate::opensearch::queries::{
    build_select_body, check_bulk_response, parse_select_response, plan_update, UpdatePlan,
};
use crate::types::{SelectQuery, SelectResult, UpdateRequest};

/// OpenSearch client implementation.
///
/// Select queries become `_search` requests; each update request becomes a
/// single `_bulk` request, refreshed when it carries a commit.
///
/// # Example
///
/// ```ignore
/// use content_mapping_repository::{IndexConfig, OpenSearchIndexClient, SelectQuery};
///
/// let client = OpenSearchIndexClient::new("http://localhost:9200", IndexConfig::default()).await?;
/// let result = client.select(&SelectQuery::new("objectclass:Article")).await?;
/// println!("Found {} documents", result.num_found);
/// ```
pub struct OpenSearchIndexClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchIndexClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index the client reads from and writes to
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchIndexClient)` - A new client instance
    /// * `Err(IndexError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, IndexError> {
        let parsed_url = Url::parse(url).map_err(|e| IndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Ensure the index exists with the content mappings.
    ///
    /// An existing index gets its result window raised so that one page can
    /// hold every document of an object class. This should be called during
    /// application startup.
    pub async fn ensure_index_exists(&self) -> Result<(), IndexError> {
        let index = self.index_config.name.as_str();

        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        if exists.status_code().is_success() {
            debug!(index = %index, "Index already exists");
            return self.raise_result_window().await;
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| IndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(IndexError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created index");
        Ok(())
    }

    /// Check if the cluster is healthy (`green` or `yellow`).
    pub async fn health_check(&self) -> Result<bool, IndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;

        let status = body.get("status").and_then(Value::as_str).unwrap_or("red");
        debug!(status = %status, "Cluster health");
        Ok(matches!(status, "green" | "yellow"))
    }

    /// Raise `max_result_window` on an index created elsewhere.
    async fn raise_result_window(&self) -> Result<(), IndexError> {
        let response = self
            .client
            .indices()
            .put_settings(IndicesPutSettingsParts::Index(&[self.index_config.name.as_str()]))
            .body(result_window_settings())
            .send()
            .await
            .map_err(|e| IndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Updating result window failed");
            return Err(IndexError::index_creation(format!(
                "Updating result window failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %self.index_config.name, "Result window updated");
        Ok(())
    }

    /// Make all preceding writes visible without sending any documents.
    async fn refresh(&self) -> Result<(), IndexError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[self.index_config.name.as_str()]))
            .send()
            .await
            .map_err(|e| IndexError::bulk_operation(e.to_string()))?;

        Self::ensure_write_success(response, "Refresh").await?;
        Ok(())
    }

    /// Turn a non-2xx write response into a bulk operation error.
    async fn ensure_write_success(
        response: Response,
        operation: &str,
    ) -> Result<Response, IndexError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }
        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "{} request failed", operation);
        Err(IndexError::bulk_operation(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }
}

#[async_trait]
impl IndexClient for OpenSearchIndexClient {
    #[instrument(skip(self), fields(index = %self.index_config.name))]
    async fn select(&self, query: &SelectQuery) -> Result<SelectResult, IndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.name.as_str()]))
            .body(build_select_body(query))
            .send()
            .await
            .map_err(|e| IndexError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(IndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;

        parse_select_response(&body)
    }

    #[instrument(skip(self, request), fields(index = %self.index_config.name, commands = request.commands().len()))]
    async fn update(&self, request: &UpdateRequest<'_>) -> Result<(), IndexError> {
        let (lines, refresh) = match plan_update(&self.index_config.name, request)? {
            UpdatePlan::Skip => return Ok(()),
            UpdatePlan::RefreshOnly => return self.refresh().await,
            UpdatePlan::Bulk { lines, refresh } => (lines, refresh),
        };

        let line_count = lines.len();
        let body: Vec<JsonBody<Value>> = lines.into_iter().map(Into::into).collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .refresh(refresh)
            .body(body)
            .send()
            .await
            .map_err(|e| IndexError::bulk_operation(e.to_string()))?;
        let response = Self::ensure_write_success(response, "Bulk").await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;

        check_bulk_response(&response_body).inspect_err(|e| {
            error!(error = %e, "Bulk request reported item failures");
        })?;

        debug!(lines = line_count, "Bulk request applied");
        Ok(())
    }
}
