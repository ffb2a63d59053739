//! Parameter store client
//!
//! Looks up named string values from the external parameter store. The
//! console needs exactly two of them, the data-source and knowledge-base
//! identifiers, both stored under deterministic key names of the form
//! `/<namespace>/<environment>/<ParamName>`.

use crate::config::ServiceConfig;
use crate::error::{KbChatError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameter name for the data-source identifier
pub const DATA_SOURCE_ID_PARAM: &str = "DataSourceId";

/// Parameter name for the knowledge-base identifier
pub const KNOWLEDGE_BASE_ID_PARAM: &str = "KnowledgeBaseId";

/// The pair of identifiers the console resolves at session start
///
/// Immutable after resolution; both values are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBaseRef {
    /// Identifier of the data source backing the knowledge base
    pub data_source_id: String,
    /// Identifier of the knowledge base itself
    pub knowledge_base_id: String,
}

/// Builds a parameter-store key name
///
/// # Examples
///
/// ```
/// use kbchat::services::params::parameter_key;
///
/// let key = parameter_key("kbchat", "dev", "KnowledgeBaseId");
/// assert_eq!(key, "/kbchat/dev/KnowledgeBaseId");
/// ```
pub fn parameter_key(namespace: &str, environment: &str, name: &str) -> String {
    format!("/{}/{}/{}", namespace, environment, name)
}

#[derive(Debug, Serialize)]
struct GetParameterRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GetParameterResponse {
    parameter: ParameterValue,
}

#[derive(Debug, Deserialize)]
struct ParameterValue {
    #[serde(default)]
    #[allow(dead_code)]
    name: String,
    value: String,
}

/// Client for the external parameter store
pub struct ParameterStoreClient {
    client: Client,
    endpoint: String,
}

impl ParameterStoreClient {
    /// Create a new parameter store client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("kbchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                KbChatError::ParameterStore(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a single parameter value by key name
    ///
    /// # Errors
    ///
    /// Returns error if the key is absent, the store is unreachable, or the
    /// response cannot be parsed. There is no retry and no default value.
    pub async fn get_parameter(&self, name: &str) -> Result<String> {
        let url = format!("{}/v1/parameters/get", self.endpoint);
        tracing::debug!("Fetching parameter {}", name);

        let response = self
            .client
            .post(&url)
            .json(&GetParameterRequest {
                name: name.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                KbChatError::ParameterStore(format!(
                    "Failed to reach parameter store at {}: {}",
                    url, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KbChatError::ParameterStore(format!(
                "Parameter {} lookup failed ({}): {}",
                name, status, body
            ))
            .into());
        }

        let parsed: GetParameterResponse = response.json().await.map_err(|e| {
            KbChatError::ParameterStore(format!(
                "Failed to parse parameter store response for {}: {}",
                name, e
            ))
        })?;

        Ok(parsed.parameter.value)
    }

    /// Resolve the data-source and knowledge-base identifiers for an environment
    ///
    /// Performs two independent key lookups. Either key missing or holding an
    /// empty value is a fatal configuration error for the session.
    pub async fn resolve(&self, namespace: &str, environment: &str) -> Result<KnowledgeBaseRef> {
        let data_source_id = self
            .get_parameter(&parameter_key(namespace, environment, DATA_SOURCE_ID_PARAM))
            .await?;
        let knowledge_base_id = self
            .get_parameter(&parameter_key(
                namespace,
                environment,
                KNOWLEDGE_BASE_ID_PARAM,
            ))
            .await?;

        if data_source_id.is_empty() || knowledge_base_id.is_empty() {
            return Err(KbChatError::ParameterStore(format!(
                "Resolved empty identifier for environment {}",
                environment
            ))
            .into());
        }

        tracing::info!(
            "Resolved knowledge base {} with data source {}",
            knowledge_base_id,
            data_source_id
        );

        Ok(KnowledgeBaseRef {
            data_source_id,
            knowledge_base_id,
        })
    }
}
